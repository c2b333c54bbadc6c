//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI-compatible chat client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API endpoint base (e.g. https://api.openai.com)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (bearer token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model to query
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum characters of resume content to send per query
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// At most this many leading chunks are sent per query
    #[serde(default = "default_max_chunks")]
    pub max_chunks: usize,
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_content_chars() -> usize {
    12000
}

fn default_max_chunks() -> usize {
    5
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_content_chars: default_max_content_chars(),
            max_chunks: default_max_chunks(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENDPOINT`: API endpoint base
    /// - `LLM_API_KEY` / `OPENAI_API_KEY`: bearer token (`LLM_API_KEY` wins)
    /// - `LLM_MODEL`: model name
    /// - `LLM_MAX_TOKENS`: maximum tokens in response
    /// - `LLM_TEMPERATURE`: generation temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: max resume chars per query
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LLM_API_KEY") {
            self.api_key = Some(val);
        } else if self.api_key.is_none() {
            if let Ok(val) = std::env::var("OPENAI_API_KEY") {
                self.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_content_chars = n;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }
}
