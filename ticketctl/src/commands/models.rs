//! Model listing command

use crate::client::TicketifyClient;
use crate::config::TicketctlConfig;
use crate::output;
use ticketify_core::errors::CoreError;

/// Handle models command
pub async fn handle_models_command(config: &TicketctlConfig) -> Result<(), CoreError> {
    let client = TicketifyClient::new(config.clone())?;
    let models = client.list_models().await?;
    output::display_models(&models, &config.default_format)
}
