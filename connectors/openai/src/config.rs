//! Configuration for the OpenAI-compatible connector

use serde::{Deserialize, Serialize};
use ticketify_core::Language;

/// Default provider base URL
pub const DEFAULT_API_BASE: &str = "https://api.cerebras.ai/v1";

/// Default model name
pub const DEFAULT_MODEL: &str = "llama-3.3-70b";

/// Chat-completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Provider name, used in logs
    pub provider: String,
    /// API key; empty means unconfigured
    pub api_key: String,
    /// Model to use (e.g., "llama-3.3-70b")
    pub model: String,
    /// API base URL, without the trailing `/chat/completions`
    pub api_base: String,
    /// Language the model is asked to answer in
    pub language: Language,
    /// Request timeout in milliseconds; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
}

impl OpenAiConfig {
    /// Create a new config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            provider: "cerebras".to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            language: Language::default(),
            timeout_ms: None,
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL (any OpenAI-compatible service)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the answer language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full URL for an API path such as `chat/completions`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self::new("") // Empty API key - must be set by user
    }
}
