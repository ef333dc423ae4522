//! `ticketify-server`: serves the ticket endpoint

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use ticketify_connector_openai::OpenAiConnector;
use ticketify_core::traits::PresentationAdapter;
use ticketify_http::{HttpApi, ServerConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ticketify-server")]
#[command(about = "Turns incident descriptions into JSON tickets through a chat-completion API")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => config.with_overrides(args.host, args.port),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.has_api_key() {
        warn!("CEREBRAS_API_KEY is not set; ticket requests will fail with 500");
    }
    info!("Using model {} at {}", config.model, config.base_url);

    let connector = match OpenAiConnector::new(config.connector_config()) {
        Ok(connector) => connector,
        Err(e) => {
            error!("Failed to create connector: {}", e);
            process::exit(1);
        }
    };

    let http_config = match config.http_config() {
        Ok(http_config) => http_config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = HttpApi::new(http_config).start(Arc::new(connector)).await {
        error!("{}", e);
        process::exit(1);
    }
}
