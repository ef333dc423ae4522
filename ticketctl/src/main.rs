//! Command-line interface for Ticketify

use clap::Parser;
use std::process;
use tracing::{error, info, Level};

mod cli;
mod client;
mod commands;
mod config;
mod output;

use cli::*;
use config::TicketctlConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match TicketctlConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(&args);

    info!("Starting ticketctl with endpoint: {}", config.endpoint);

    let result = match args.command {
        Commands::Ticket(ticket_args) => {
            commands::ticket::handle_ticket_command(ticket_args, &config).await
        }
        Commands::Example { index } => {
            commands::example::handle_example_command(config.language, index);
            Ok(())
        }
        Commands::Models => commands::models::handle_models_command(&config).await,
        Commands::Health => commands::health::handle_health_command(&config).await,
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}
