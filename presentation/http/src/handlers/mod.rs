//! HTTP request handlers

pub mod health;
pub mod models;
pub mod ticket;

use crate::ErrorBody;
use axum::{http::StatusCode, response::Json};

/// Fallback for unmatched routes
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}
