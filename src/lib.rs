pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod summarizer;
pub mod upload;

use std::sync::Arc;
use config::Config;
use summarizer::{Summarize, Summarizer};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub summarizer: Arc<dyn Summarize>,
}

impl AppState {
    /// State wired to the OpenAI completions client described by `config`.
    pub fn new(config: Config) -> Self {
        let summarizer = Summarizer::openai(config.provider.clone());
        Self::with_summarizer(config, Arc::new(summarizer))
    }

    pub fn with_summarizer(config: Config, summarizer: Arc<dyn Summarize>) -> Self {
        Self {
            config: Arc::new(config),
            summarizer,
        }
    }
}
