//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use url_summarizer::error::{AppError, Result};
use url_summarizer::llm::{ModelBackend, ModelInvoker};
use url_summarizer::scraper::PageFetcher;
use url_summarizer::summary::Summarizer;

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes this thread's `tracing` events into the capture until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Model backend that records prompts and answers with a fixed completion.
pub struct FakeBackend {
    completion: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn completing(text: &str) -> Arc<Self> {
        Arc::new(Self {
            completion: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            completion: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for FakeBackend {
    async fn invoke_model(&self, _model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let payload: Value = serde_json::from_slice(&body).unwrap();
        self.prompts
            .lock()
            .unwrap()
            .push(payload["prompt"].as_str().unwrap().to_string());

        match &self.completion {
            Some(text) => Ok(completion_body(text).to_string().into_bytes()),
            None => Err(AppError::InvocationError("backend unavailable".to_string())),
        }
    }
}

pub fn completion_body(text: &str) -> Value {
    json!({
        "id": 1234,
        "prompt": { "text": "..." },
        "completions": [
            { "data": { "text": text }, "finishReason": { "reason": "endoftext" } }
        ]
    })
}

pub fn summarizer_with(backend: Arc<dyn ModelBackend>) -> Summarizer {
    Summarizer::new(
        PageFetcher::new(Client::new()),
        ModelInvoker::new(backend, "ai21.j2-ultra-v1"),
    )
}
