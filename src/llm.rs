//! Completion provider seam and the OpenAI completions client.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::ProviderError;

// Shared client so connections are pooled across requests
static CLIENT: Lazy<Client> = Lazy::new(Client::new);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Submits a prompt and returns the generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the legacy `/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompletions {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiCompletions {
    pub fn new(api_key: impl Into<String>, api_base: &str) -> Self {
        Self {
            client: CLIENT.clone(),
            api_key: api_key.into(),
            endpoint: format!("{}/completions", api_base.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.api_key.clone().unwrap_or_default(), &config.api_base)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletions {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = res
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no choices".into()))
    }
}
