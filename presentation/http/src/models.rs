//! Response bodies produced by the HTTP layer itself

use serde::{Deserialize, Serialize};

/// Re-export core wire types for convenience
pub use ticketify_core::types::{TicketRequest, TicketResponse, Usage};

/// Error body: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub model: String,
    /// Whether an upstream API key is configured
    pub configured: bool,
    pub timestamp: String,
}
