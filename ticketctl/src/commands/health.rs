//! Health check command implementation

use crate::client::TicketifyClient;
use crate::config::TicketctlConfig;
use colored::*;
use ticketify_core::errors::CoreError;
use tracing::info;

/// Handle health check command
pub async fn handle_health_command(config: &TicketctlConfig) -> Result<(), CoreError> {
    let client = TicketifyClient::new(config.clone())?;

    info!("Checking Ticketify health at {}", config.endpoint);

    match client.health().await {
        Ok(health) => {
            println!("{}", "✓ Ticketify is healthy".green().bold());
            println!("Status: {}", health.status.green());
            if let Some(version) = health.version {
                println!("Version: {}", version);
            }
            if let (Some(provider), Some(model)) = (health.provider, health.model) {
                println!("Upstream: {} / {}", provider, model);
            }
            if health.configured {
                println!("API key: {}", "configured".green());
            } else {
                println!("API key: {}", "missing".yellow());
            }
            println!("Timestamp: {}", health.timestamp);
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Ticketify health check failed".red().bold());
            println!("Error: {}", e.to_string().red());
            Err(e)
        }
    }
}
