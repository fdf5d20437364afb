pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod scraper;
pub mod summary;

use std::sync::Arc;
use config::Config;
use summary::Summarizer;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<Summarizer>,
}
