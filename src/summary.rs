use crate::error::{AppError, Result};
use crate::llm::ModelInvoker;
use crate::scraper::{build_prompt, extract_text, PageFetcher};

/// Marker the model is told to start each bullet with.
pub const BULLET_DELIMITER: char = '*';

/// Splits a model response into trimmed, non-empty bullets in order.
pub fn parse_bullets(response: &str) -> Vec<String> {
    response
        .trim()
        .split(BULLET_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Outcome of one pipeline run.
///
/// `bullets` is what the caller sees. `failures` records every stage that
/// degraded to an empty value, in the order they happened.
#[derive(Debug, Default)]
pub struct Summary {
    pub bullets: Vec<String>,
    pub failures: Vec<AppError>,
}

impl Summary {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs fetch, extract, prompt, invoke and parse for a single URL.
#[derive(Clone)]
pub struct Summarizer {
    fetcher: PageFetcher,
    invoker: ModelInvoker,
}

impl Summarizer {
    pub fn new(fetcher: PageFetcher, invoker: ModelInvoker) -> Self {
        Self { fetcher, invoker }
    }

    /// Never fails: each stage error is logged, recorded and replaced by an
    /// empty string so the next stage still runs.
    pub async fn summarize(&self, url: &str) -> Summary {
        let mut failures = Vec::new();

        let html = recover(url, self.fetcher.fetch(url).await, &mut failures);
        let excerpt = recover(url, extract_text(&html), &mut failures);
        tracing::debug!(url, words = excerpt.split(' ').count(), "excerpt extracted");

        let prompt = build_prompt(&excerpt);
        let response = recover(url, self.invoker.complete(&prompt).await, &mut failures);

        let bullets = parse_bullets(&response);
        tracing::info!(url, bullets = bullets.len(), failures = failures.len(), "summary complete");

        Summary { bullets, failures }
    }
}

fn recover(url: &str, result: Result<String>, failures: &mut Vec<AppError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(url, stage = err.stage(), error = %err, "stage failed, continuing with empty text");
            failures.push(err);
            String::new()
        }
    }
}
