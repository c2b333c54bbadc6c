//! Language-model query adapter.
//!
//! Sends resume chunks plus an instruction to an OpenAI-compatible
//! chat-completions API and returns the reply text.

mod config;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use config::LlmConfig;

/// System role primer sent with every query.
const SYSTEM_PROMPT: &str =
    "You are a careful assistant reviewing a candidate's resume. \
     Answer using only the resume content provided.";

/// LLM client for resume queries.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Run one query over the leading resume chunks.
    ///
    /// At most `max_chunks` chunks are joined into the model context,
    /// truncated to `max_content_chars`. One network call, no retries.
    pub async fn query(&self, chunks: &[String], instruction: &str) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;

        let joined = chunks
            .iter()
            .take(self.config.max_chunks)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n");
        let context = self.truncate_content(&joined);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Resume content:\n{}\n\n{}", context, instruction),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        debug!("querying {} ({})", url, self.config.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| LlmError::Parse("response contained no choices".to_string()))
    }

    /// Truncate content to configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.config.max_content_chars {
            return text;
        }
        // Find a valid UTF-8 boundary at or before max_content_chars
        let mut end = self.config.max_content_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured (set OPENAI_API_KEY or LLM_API_KEY)")]
    MissingApiKey,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_limit(limit: usize) -> LlmClient {
        let config = LlmConfig {
            max_content_chars: limit,
            ..LlmConfig::default()
        };
        LlmClient::new(config)
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let client = client_with_limit(5);
        // "héllo" is 6 bytes; byte 5 falls inside no character here, but
        // "éé" (4 bytes) with limit 3 would.
        assert_eq!(client.truncate_content("hello world"), "hello");

        let client = client_with_limit(3);
        let truncated = client.truncate_content("ééé");
        assert_eq!(truncated, "é");
    }

    #[test]
    fn short_content_is_untouched() {
        let client = client_with_limit(100);
        assert_eq!(client.truncate_content("short"), "short");
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_network() {
        let client = LlmClient::new(LlmConfig {
            api_key: None,
            ..LlmConfig::default()
        });
        let err = client
            .query(&["chunk".to_string()], "Summarize this resume.")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
