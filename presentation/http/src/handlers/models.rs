//! Upstream model listing

use crate::{handle_ticket_error, AppState};
use axum::{
    extract::State,
    response::{Json, Response},
};
use serde_json::Value;
use ticketify_core::prelude::*;
use tracing::debug;

/// `GET /api/models`: passthrough of the provider's model list
pub async fn list_models(State(state): State<AppState>) -> Result<Json<Value>, Response> {
    debug!("Listing models from {}", state.connector.provider());

    state
        .connector
        .list_models()
        .await
        .map(Json)
        .map_err(|e| handle_ticket_error(TicketError::Llm(e), "Model listing failed"))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{get, read_json, FakeConnector};
    use axum::http::StatusCode;
    use serde_json::json;
    use ticketify_core::prelude::*;

    #[tokio::test]
    async fn test_models_passthrough() {
        let models = json!({ "object": "list", "data": [{ "id": "llama-3.3-70b" }] });
        let connector = FakeConnector::with_models(models.clone());
        let response = get(&connector, "/api/models").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, models);
    }

    #[tokio::test]
    async fn test_models_without_key() {
        let connector = FakeConnector::unconfigured();
        let response = get(&connector, "/api/models").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await, json!({ "error": "Missing CEREBRAS_API_KEY" }));
        assert_eq!(connector.calls(), 0);
    }

    #[tokio::test]
    async fn test_models_transport_failure() {
        let connector = FakeConnector::failing(LlmError::NetworkError("timeout".to_string()));
        let response = get(&connector, "/api/models").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["error"], "Model listing failed");
    }
}
