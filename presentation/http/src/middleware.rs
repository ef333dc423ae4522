//! Middleware for the HTTP layer

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag each request with a fresh id, log its outcome, and echo the id back
pub async fn request_logging(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let span = info_span!("request", %request_id);

    async move {
        let start_time = Instant::now();
        debug!("Incoming request: {} {}", method, uri);

        let mut response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        if status.is_success() {
            info!("{} {} - {} ({:?})", method, uri, status, duration);
        } else {
            warn!("{} {} - {} ({:?})", method, uri, status, duration);
        }

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
