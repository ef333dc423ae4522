//! Error types for Ticketify operations

use thiserror::Error;

/// Main error type for configuration, client and CLI operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error {status}")]
    Api { status: u16, body: serde_json::Value },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors produced while handling a ticket request
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Errors related to LLM connector operations
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Missing CEREBRAS_API_KEY")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success answer from the provider; status and body are relayed as-is
    #[error("API error from LLM provider: status {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: String,
    },

    #[error("Failed to parse LLM response: {0}")]
    ResponseParseError(String),

    #[error("Internal connector error: {0}")]
    InternalError(String),
}

/// Errors related to presentation adapters
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}
