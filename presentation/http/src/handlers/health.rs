//! Health check handler

use crate::{AppState, HealthStatus};
use axum::{extract::State, response::Json};

/// Health check endpoint. Reports configuration without calling upstream.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.connector.provider().to_string(),
        model: state.connector.model().to_string(),
        configured: state.connector.ensure_configured().is_ok(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
