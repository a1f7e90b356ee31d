//! LLM-backed article summarization against an OpenAI-compatible API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;

/// Stored verbatim when the model returns no usable text.
pub const FALLBACK_SUMMARY: &str = "Failed to generate summary.";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Request(String),

    #[error("summarization api returned status {0}")]
    Api(StatusCode),

    #[error("could not parse summarization response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` under the given system `prompt`.
    async fn summarize(&self, text: &str, prompt: &str) -> Result<String, SummarizeError>;
}

pub struct OpenAiSummarizer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiSummarizer {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai_api_key(),
            config.openai_base_url(),
            config.summary_model(),
            config.summary_max_tokens(),
        )
    }

    pub fn new(api_key: &str, base_url: &str, model: &str, max_tokens: u32) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn summarize(&self, text: &str, prompt: &str) -> Result<String, SummarizeError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": prompt},
                    {"role": "user", "content": text},
                ],
                "max_tokens": self.max_tokens,
            }))
            .send()
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizeError::Api(status));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| SummarizeError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty());

        match content {
            Some(summary) => Ok(summary),
            None => {
                debug!("model returned no content, substituting fallback summary");
                Ok(FALLBACK_SUMMARY.to_string())
            }
        }
    }
}
