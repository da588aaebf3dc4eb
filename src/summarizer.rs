use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::llm::{CompletionProvider, CompletionRequest, OpenAiCompletions};

const INSTRUCTION: &str = "Summarize the following text concisely:";
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizationResult {
    Summary(String),
    Failure(String),
}

/// The summarization service as seen by the HTTP layer.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, text: &str) -> SummarizationResult;
}

pub struct Summarizer {
    config: ProviderConfig,
    provider: Arc<dyn CompletionProvider>,
    configured: bool,
}

impl Summarizer {
    pub fn new(config: ProviderConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        let configured = config.is_configured();
        Self {
            config,
            provider,
            configured,
        }
    }

    /// Summarizer backed by the OpenAI completions endpoint.
    pub fn openai(config: ProviderConfig) -> Self {
        let provider = Arc::new(OpenAiCompletions::from_config(&config));
        Self::new(config, provider)
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn build_request(&self, text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(text),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Summarize for Summarizer {
    async fn summarize(&self, text: &str) -> SummarizationResult {
        if !self.configured {
            warn!("OpenAI API key not configured, returning placeholder summary");
            return SummarizationResult::Summary(format!(
                "[Summary generation skipped: OpenAI API key not configured] Placeholder for: {}",
                preview(text)
            ));
        }

        let request = self.build_request(text);
        debug!(model = %request.model, prompt_len = request.prompt.len(), "Calling completion API");

        match self.provider.complete(&request).await {
            Ok(completion) => {
                info!(summary_len = completion.len(), "Completion API call successful");
                SummarizationResult::Summary(completion.trim().to_string())
            }
            Err(e) => {
                warn!(error = %e, "Completion API call failed");
                SummarizationResult::Failure(format!("Error during summarization: {}", e))
            }
        }
    }
}

pub fn build_prompt(content: &str) -> String {
    let mut result = String::with_capacity(INSTRUCTION.len() + 2 + content.len());
    result.push_str(INSTRUCTION);
    result.push_str("\n\n");
    result.push_str(content);
    result
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
