//! Connector for OpenAI-compatible chat-completion APIs

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::time::{Duration, Instant};
use ticketify_core::prelude::*;
use tracing::{debug, error, info, warn};

mod config;
mod models;

pub use config::{OpenAiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use models::*;

/// OpenAI-compatible implementation of LlmConnector
pub struct OpenAiConnector {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiConnector {
    /// Create a new connector. An empty API key is accepted here and
    /// reported by [`LlmConnector::ensure_configured`] at request time.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn build_request(&self, request: &TicketRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: build_messages(request, self.config.language),
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    /// Capture a non-success answer so it can be relayed unchanged
    async fn upstream_error(&self, response: Response) -> LlmError {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match response.text().await {
            Ok(body) => {
                warn!("{} API error {}: {}", self.config.provider, status, body);
                LlmError::Upstream {
                    status: status.as_u16(),
                    content_type,
                    body,
                }
            }
            Err(e) => {
                error!("Failed to read {} error body: {}", self.config.provider, e);
                LlmError::NetworkError(format!("Failed to read error body: {}", e))
            }
        }
    }
}

#[async_trait]
impl LlmConnector for OpenAiConnector {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn ensure_configured(&self) -> Result<(), LlmError> {
        if self.config.has_api_key() {
            Ok(())
        } else {
            Err(LlmError::MissingApiKey)
        }
    }

    async fn generate_ticket(&self, request: &TicketRequest) -> Result<TicketResponse, LlmError> {
        self.ensure_configured()?;
        let start_time = Instant::now();

        let chat_request = self.build_request(request);
        debug!(
            "Sending chat completion to {} (model {}, {} chars of incident text)",
            self.config.provider,
            chat_request.model,
            request.incident_text.len()
        );

        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!("{} request failed: {}", self.config.provider, e);
                LlmError::NetworkError(format!("HTTP request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(self.upstream_error(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::NetworkError(format!("Failed to read response: {}", e)))?;
        let chat_response: ChatCompletionResponse = serde_json::from_slice(&body)
            .map_err(|e| LlmError::ResponseParseError(format!("Failed to parse response: {}", e)))?;

        if chat_response
            .first_choice()
            .and_then(|c| c.finish_reason.as_deref())
            == Some("length")
        {
            warn!("Completion hit max_tokens ({}); content is likely truncated", request.max_tokens);
        }

        let ticket = TicketResponse {
            model: chat_response
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            content: chat_response.first_content().unwrap_or_default().to_string(),
            usage: chat_response.usage,
        };

        info!(
            "{} completion finished in {}ms ({} tokens)",
            self.config.provider,
            start_time.elapsed().as_millis(),
            ticket.usage_counts().and_then(|u| u.total_tokens).unwrap_or(0)
        );

        Ok(ticket)
    }

    async fn list_models(&self) -> Result<serde_json::Value, LlmError> {
        self.ensure_configured()?;

        let response = self
            .client
            .get(self.config.endpoint("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::ResponseParseError(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{any, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connector_for(server: &MockServer, api_key: &str) -> OpenAiConnector {
        let config = OpenAiConfig::new(api_key).with_api_base(format!("{}/v1", server.uri()));
        OpenAiConnector::new(config).unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "llama-3.3-70b",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
        })
    }

    #[test]
    fn test_connector_creation() {
        let connector = OpenAiConnector::new(OpenAiConfig::new("test-key"));
        assert!(connector.is_ok());
    }

    #[test]
    fn test_build_request_shape() {
        let connector = OpenAiConnector::new(OpenAiConfig::new("test-key")).unwrap();
        let request = TicketRequest::new("Robo").with_temperature(0.5).with_max_tokens(200);
        let body = serde_json::to_value(connector.build_request(&request)).unwrap();

        assert_eq!(body["model"], "llama-3.3-70b");
        assert_eq!(body["response_format"], json!({ "type": "json_object" }));
        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Texto a analizar:\nRobo");
    }

    #[tokio::test]
    async fn test_content_is_passed_through_unmodified() {
        let server = MockServer::start().await;
        let content = "{\"id\":\"1\",\"summary\":\"x\"}";
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "response_format": { "type": "json_object" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .expect(1)
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let ticket = connector
            .generate_ticket(&TicketRequest::new("Robo en tienda"))
            .await
            .unwrap();

        assert_eq!(ticket.content, content);
        assert_eq!(ticket.model, "llama-3.3-70b");
        assert_eq!(ticket.usage.unwrap()["total_tokens"], 150);
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let ticket = connector.generate_ticket(&TicketRequest::new("x")).await.unwrap();

        assert_eq!(ticket.model, DEFAULT_MODEL);
        assert_eq!(ticket.content, "");
        assert!(ticket.usage.is_none());
    }

    #[tokio::test]
    async fn test_null_choices_and_usage_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "m",
                "choices": null,
                "usage": null
            })))
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let ticket = connector.generate_ticket(&TicketRequest::new("x")).await.unwrap();

        assert_eq!(ticket.model, "m");
        assert_eq!(ticket.content, "");
        assert!(ticket.usage.is_none());
    }

    #[tokio::test]
    async fn test_usage_with_null_counter_is_relayed() {
        let server = MockServer::start().await;
        let usage = json!({ "prompt_tokens": 10, "completion_tokens": null, "total_tokens": 10 });
        let mut body = completion("{}");
        body["usage"] = usage.clone();
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let ticket = connector.generate_ticket(&TicketRequest::new("x")).await.unwrap();

        assert_eq!(ticket.content, "{}");
        assert_eq!(ticket.usage, Some(usage));
    }

    #[tokio::test]
    async fn test_upstream_error_is_relayed() {
        let server = MockServer::start().await;
        let body = json!({ "error": { "message": "rate limited", "type": "too_many_requests" } });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let err = connector
            .generate_ticket(&TicketRequest::new("x"))
            .await
            .unwrap_err();

        match err {
            LlmError::Upstream { status, body: relayed, .. } => {
                assert_eq!(status, 429);
                let relayed: serde_json::Value = serde_json::from_str(&relayed).unwrap();
                assert_eq!(relayed, body);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let connector = connector_for(&server, "");
        let err = connector
            .generate_ticket(&TicketRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert!(matches!(connector.list_models().await, Err(LlmError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_non_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        let err = connector
            .generate_ticket(&TicketRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ResponseParseError(_)));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let config = OpenAiConfig::new("test-key").with_api_base("http://127.0.0.1:1/v1");
        let connector = OpenAiConnector::new(config).unwrap();
        let err = connector
            .generate_ticket(&TicketRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_list_models_passthrough() {
        let server = MockServer::start().await;
        let models = json!({
            "object": "list",
            "data": [{ "id": "llama-3.3-70b", "object": "model" }]
        });
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(models.clone()))
            .mount(&server)
            .await;

        let connector = connector_for(&server, "test-key");
        assert_eq!(connector.list_models().await.unwrap(), models);
    }
}
