//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ticketify_core::Language;

#[derive(Parser)]
#[command(name = "ticketctl")]
#[command(about = "Ticketify incident ticket client")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ticketify server URL
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Display language (es, en)
    #[arg(short, long, global = true)]
    pub language: Option<Language>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a ticket from an incident description
    Ticket(TicketArgs),
    /// Print a bundled example incident
    Example {
        /// Which example to print (wraps around)
        #[arg(short, long)]
        index: Option<usize>,
    },
    /// List models offered by the upstream provider
    Models,
    /// Health check
    Health,
}

#[derive(Args, Debug, Default)]
pub struct TicketArgs {
    /// Incident text; read from --file or stdin when omitted
    pub text: Option<String>,
    /// Read the incident text from a file
    #[arg(long, conflicts_with_all = ["text", "example"])]
    pub file: Option<PathBuf>,
    /// Submit a bundled example incident
    #[arg(long, conflicts_with = "text")]
    pub example: bool,
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Completion token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Report identifier passed as prompt context
    #[arg(long)]
    pub report_id: Option<String>,
    /// Report date passed as prompt context
    #[arg(long)]
    pub report_date: Option<String>,
    /// Report location passed as prompt context
    #[arg(long)]
    pub report_location: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raw content, usage, parsed JSON and anomaly cards
    #[default]
    Text,
    /// Anomaly cards as a table
    Table,
    /// Endpoint response as JSON
    Json,
    /// Only the model's raw content
    Raw,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Raw => write!(f, "raw"),
        }
    }
}
