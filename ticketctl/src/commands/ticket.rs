//! Ticket generation command

use crate::cli::TicketArgs;
use crate::client::TicketifyClient;
use crate::commands::example::pick_example;
use crate::config::TicketctlConfig;
use crate::output;
use std::io::Read;
use ticketify_core::errors::CoreError;
use ticketify_core::{Language, TicketRequest, TicketView};
use tracing::{debug, info};

/// Handle ticket command
pub async fn handle_ticket_command(args: TicketArgs, config: &TicketctlConfig) -> Result<(), CoreError> {
    let request = build_request(args, config.language)?;
    let client = TicketifyClient::new(config.clone())?;

    info!("Submitting incident to {}", config.endpoint);
    debug!("Incident text: {} chars", request.incident_text.len());

    match client.create_ticket(&request).await {
        Ok(response) => {
            output::display_ticket(&response, config.language, &config.default_format)
        }
        Err(e) => {
            output::display_failure(&failure_view(&e), config.language);
            Err(e)
        }
    }
}

/// View shown when the request fails; no parse is attempted
pub fn failure_view(error: &CoreError) -> TicketView {
    match error {
        CoreError::Api { body, .. } => TicketView::from_api_error(body),
        other => TicketView::from_error(other.to_string()),
    }
}

/// Assemble the request from arguments, falling back to stdin for the text
pub fn build_request(args: TicketArgs, language: Language) -> Result<TicketRequest, CoreError> {
    let text = match (args.text, args.file, args.example) {
        (Some(text), _, _) => text,
        (None, Some(path), _) => std::fs::read_to_string(&path)?,
        (None, None, true) => pick_example(language, None).to_string(),
        (None, None, false) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut request = TicketRequest::new(text).with_report(
        args.report_id,
        args.report_date,
        args.report_location,
    );
    if let Some(temperature) = args.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    Ok(request)
}
