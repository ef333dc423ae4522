//! Ticket generation handler

use crate::{handle_ticket_error, AppState, ErrorBody};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use ticketify_core::prelude::*;
use tracing::{debug, info};

/// `POST /api/ticket`
///
/// Check order: body shape, upstream credential, incident text. Neither
/// rejection reaches the upstream.
pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<Json<TicketResponse>, Response> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected ticket payload: {}", rejection.body_text());
        (StatusCode::BAD_REQUEST, Json(ErrorBody::new(rejection.body_text()))).into_response()
    })?;

    generate(&state, &request)
        .await
        .map(Json)
        .map_err(|e| handle_ticket_error(e, "Ticket generation failed"))
}

async fn generate(state: &AppState, request: &TicketRequest) -> Result<TicketResponse, TicketError> {
    state.connector.ensure_configured()?;
    request.validate()?;

    debug!(
        "Generating ticket (temperature {}, max_tokens {}, {} context fields)",
        request.temperature,
        request.max_tokens,
        request.report_context().len()
    );

    let ticket = state.connector.generate_ticket(request).await?;
    info!("Ticket generated by {} ({} chars)", ticket.model, ticket.content.len());
    Ok(ticket)
}
