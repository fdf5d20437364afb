use reqwest::Client;
use scraper::{Html, Node, Selector};
use once_cell::sync::Lazy;
use crate::error::{AppError, Result};

/// Upper bound on the number of space-separated tokens kept from a page.
pub const MAX_EXCERPT_WORDS: usize = 1000;

/// Elements whose text never reaches the excerpt.
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Stripped along with whitespace at either end of the page text.
const BYTE_ORDER_MARK: char = '\u{feff}';

const SUMMARY_INSTRUCTION: &str =
    "Summarize the above web page content in 5 bullets.\nStart each bullet point with a *\n";

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

/// Retrieves raw page content over HTTP with a client owned by the caller.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GETs `url` and returns the decoded body.
    ///
    /// Error statuses still carry a body, so they are logged but not treated
    /// as failures.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "page responded with non-success status");
        }
        let html = response.text().await?;
        tracing::debug!(url, bytes = html.len(), "page fetched");
        Ok(html)
    }
}

/// Reduces an HTML document to the visible text of its `body`, capped at
/// [`MAX_EXCERPT_WORDS`] tokens.
pub fn extract_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .ok_or_else(|| AppError::ParseError("No <body> element found in the HTML".to_string()))?;

    let mut text = String::new();
    for node in body.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .any(|ancestor| match ancestor.value() {
                Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
                _ => false,
            });
        if !hidden {
            text.push_str(fragment);
        }
    }

    let text = text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
    Ok(truncate_words(text, MAX_EXCERPT_WORDS))
}

/// Keeps the first `limit` tokens of `text` split on single spaces.
fn truncate_words(text: &str, limit: usize) -> String {
    text.split(' ').take(limit).collect::<Vec<_>>().join(" ")
}

/// Wraps an excerpt in the summarization instruction.
///
/// The excerpt is interpolated verbatim; quote characters inside it are not
/// escaped.
pub fn build_prompt(excerpt: &str) -> String {
    let mut result = String::with_capacity(excerpt.len() + SUMMARY_INSTRUCTION.len() + 3);
    result.push('"');
    result.push_str(excerpt);
    result.push_str("\"\n");
    result.push_str(SUMMARY_INSTRUCTION);
    result
}
