//! HTTP client for the Ticketify API

use crate::config::TicketctlConfig;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use ticketify_core::errors::CoreError;
use ticketify_core::{TicketRequest, TicketResponse};
use tracing::{debug, error};

/// API client for Ticketify
pub struct TicketifyClient {
    client: Client,
    config: TicketctlConfig,
}

impl TicketifyClient {
    /// Create a new API client
    pub fn new(config: TicketctlConfig) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response, CoreError> {
        let url = self.config.api_url(path);
        debug!("GET {}", url);

        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Http(format!("HTTP GET failed: {}", e)))
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, CoreError> {
        let url = self.config.api_url(path);
        debug!("POST {}", url);

        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CoreError::Http(format!("HTTP POST failed: {}", e)))
    }

    /// Submit an incident to `/api/ticket`
    pub async fn create_ticket(&self, request: &TicketRequest) -> Result<TicketResponse, CoreError> {
        let response = self.post("/api/ticket", request).await?;
        self.handle_response(response).await
    }

    /// Fetch `/api/models`
    pub async fn list_models(&self) -> Result<serde_json::Value, CoreError> {
        let response = self.get("/api/models").await?;
        self.handle_response(response).await
    }

    /// Fetch `/health`
    pub async fn health(&self) -> Result<HealthResponse, CoreError> {
        let response = self.get("/health").await?;
        self.handle_response(response).await
    }

    /// Handle API response, checking status and parsing JSON.
    ///
    /// Error bodies are kept as JSON when they parse, as a JSON string otherwise.
    pub async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, CoreError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| CoreError::Http(format!("Failed to parse JSON response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("API error {}: {}", status, error_text);

            let body = serde_json::from_str(&error_text)
                .unwrap_or(serde_json::Value::String(error_text));
            Err(CoreError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Health check response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub configured: bool,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TicketifyClient {
        TicketifyClient::new(TicketctlConfig {
            endpoint: server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = TicketifyClient::new(TicketctlConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_create_ticket_posts_camel_case_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ticket"))
            .and(body_json(json!({
                "incidentText": "Robo en tienda",
                "temperature": 0.2,
                "maxTokens": 350
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama-3.3-70b",
                "content": "{\"id\":\"1\"}",
                "usage": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ticket = client_for(&server)
            .create_ticket(&TicketRequest::new("Robo en tienda"))
            .await
            .unwrap();
        assert_eq!(ticket.content, "{\"id\":\"1\"}");
        assert!(ticket.usage.is_none());
    }

    #[tokio::test]
    async fn test_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ticket"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "incidentText is required" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_ticket(&TicketRequest::new(""))
            .await
            .unwrap_err();
        match err {
            CoreError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, json!({ "error": "incidentText is required" }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_becomes_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/models"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_models().await.unwrap_err();
        assert!(matches!(err, CoreError::Api { status: 502, body } if body == json!("bad gateway")));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = TicketifyClient::new(TicketctlConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        })
        .unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, CoreError::Http(_)));
    }
}
