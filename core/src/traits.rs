//! Core traits defining the plugin interfaces for Ticketify

use crate::errors::{LlmError, PresentationError};
use crate::types::{TicketRequest, TicketResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for chat-completion providers able to turn an incident into a ticket
#[async_trait]
pub trait LlmConnector: Send + Sync {
    /// Short provider identifier used in logs (e.g. "openai", "cerebras")
    fn provider(&self) -> &str;

    /// Model name requests are sent to
    fn model(&self) -> &str;

    /// Fail fast when the connector cannot authenticate against its provider.
    ///
    /// Called before any request validation so that a misconfigured server
    /// reports itself regardless of the payload.
    fn ensure_configured(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Send one chat-completion request for the incident and return the
    /// model's raw text content. Never retries.
    async fn generate_ticket(&self, request: &TicketRequest) -> Result<TicketResponse, LlmError>;

    /// List the models offered by the provider, as returned by the provider
    async fn list_models(&self) -> Result<serde_json::Value, LlmError> {
        Err(LlmError::InternalError("Model listing not supported".to_string()))
    }
}

/// Trait for presentation adapters (network transport layers)
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    /// Serve requests until shutdown, delegating ticket generation to `connector`
    async fn start(&self, connector: Arc<dyn LlmConnector>) -> Result<(), PresentationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Usage;

    struct EchoConnector;

    #[async_trait]
    impl LlmConnector for EchoConnector {
        fn provider(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate_ticket(&self, request: &TicketRequest) -> Result<TicketResponse, LlmError> {
            Ok(TicketResponse {
                model: self.model().to_string(),
                content: request.incident_text.clone(),
                usage: Some(Usage::new(1, 1, 2).to_value()),
            })
        }
    }

    #[tokio::test]
    async fn test_default_methods() {
        let connector = EchoConnector;
        assert!(connector.ensure_configured().is_ok());
        assert!(matches!(
            connector.list_models().await,
            Err(LlmError::InternalError(_))
        ));
    }

    #[tokio::test]
    async fn test_connector_as_trait_object() {
        let connector: Arc<dyn LlmConnector> = Arc::new(EchoConnector);
        let response = connector
            .generate_ticket(&TicketRequest::new("hola"))
            .await
            .unwrap();
        assert_eq!(response.content, "hola");
        assert_eq!(response.model, "echo-1");
    }
}
