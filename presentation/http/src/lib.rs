//! HTTP presentation layer for Ticketify
//!
//! Exposes the ticket endpoint over axum. Handlers hold no state of their own:
//! every request validates its payload, makes at most one upstream call
//! through the shared [`LlmConnector`], and answers.

use async_trait::async_trait;
use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use ticketify_core::errors::PresentationError;
use ticketify_core::prelude::*;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod config;
mod handlers;
mod middleware;
mod models;

pub use config::ServerConfig;
pub use middleware::REQUEST_ID_HEADER;
pub use models::*;

/// HTTP layer configuration
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_cors: true,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn LlmConnector>,
}

/// axum-based presentation adapter
pub struct HttpApi {
    config: HttpApiConfig,
}

impl HttpApi {
    pub fn new(config: HttpApiConfig) -> Self {
        Self { config }
    }

    /// Build the router with all routes
    pub fn router(&self, connector: Arc<dyn LlmConnector>) -> Router {
        build_router(AppState { connector }, self.config.enable_cors)
    }
}

/// Routes, tracing and request-id middleware, optional permissive CORS
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/ticket", post(handlers::ticket::create_ticket))
        .route("/api/models", get(handlers::models::list_models))
        .fallback(handlers::not_found)
        .with_state(state);

    if enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(middleware::request_logging)),
    )
}

#[async_trait]
impl PresentationAdapter for HttpApi {
    async fn start(&self, connector: Arc<dyn LlmConnector>) -> Result<(), PresentationError> {
        info!(
            "Starting HTTP server on {} ({} / {})",
            self.config.bind_address,
            connector.provider(),
            connector.model()
        );

        let router = self.router(connector);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|e| {
                PresentationError::StartupFailed(format!(
                    "Failed to bind to {}: {}",
                    self.config.bind_address, e
                ))
            })?;

        info!("Running on http://{}", self.config.bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Convert ticket errors to HTTP responses.
///
/// `failure` is the generic message used for transport and decoding errors.
/// Upstream answers are relayed with their own status and body.
pub fn handle_ticket_error(error: TicketError, failure: &str) -> Response {
    match error {
        TicketError::InvalidRequest(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
        }
        TicketError::Llm(LlmError::MissingApiKey) => {
            error!("Rejecting request: upstream API key is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(LlmError::MissingApiKey.to_string())),
            )
                .into_response()
        }
        TicketError::Llm(LlmError::Upstream {
            status,
            content_type,
            body,
        }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = content_type
                .and_then(|ct| HeaderValue::from_str(&ct).ok())
                .unwrap_or_else(|| HeaderValue::from_static("application/json"));
            (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        TicketError::Llm(other) => {
            error!("{}: {}", failure, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_details(failure, other.to_string())),
            )
                .into_response()
        }
    }
}
