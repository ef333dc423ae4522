//! # Ticketify Core
//!
//! Core types, traits, and rendering logic for the Ticketify incident service.
//! This crate defines the request/response contract of the ticket endpoint,
//! the connector abstraction every upstream provider implements, and the
//! best-effort view model clients use to display generated tickets.

pub mod types;
pub mod traits;
pub mod errors;
pub mod prompt;
pub mod render;
pub mod samples;

// Re-export commonly used types and traits
pub use types::{Language, Severity, TicketRequest, TicketResponse, Usage};
pub use traits::LlmConnector;
pub use errors::{CoreError, LlmError, TicketError};
pub use render::{AnomalyCard, AnomalyPanel, ParsedView, TicketView, UsageSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::traits::*;
    pub use crate::errors::*;
    pub use crate::prompt::*;
    pub use async_trait::async_trait;
}
