//! Configuration management for ticketctl

use crate::cli::{Cli, OutputFormat};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use ticketify_core::errors::CoreError;
use ticketify_core::Language;

/// Configuration for ticketctl CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketctlConfig {
    /// Ticketify server URL
    pub endpoint: String,
    /// Display language
    pub language: Language,
    /// Default output format
    pub default_format: OutputFormat,
    /// Request timeout in seconds; unset waits for the server
    pub timeout: Option<u64>,
}

impl Default for TicketctlConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000".to_string(),
            language: Language::Spanish,
            default_format: OutputFormat::Text,
            timeout: None,
        }
    }
}

impl TicketctlConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: &Option<std::path::PathBuf>) -> Result<Self, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(TicketctlConfig::default()));

        // Load from default config file if it exists
        let default_config_paths = ["ticketctl.yaml", "ticketctl.yml", ".ticketctl.yaml"];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        // Load from environment variables (prefixed with TICKETCTL_)
        figment = figment.merge(Env::prefixed("TICKETCTL_"));

        figment
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(ref endpoint) = args.endpoint {
            self.endpoint = endpoint.clone();
        }

        if let Some(language) = args.language {
            self.language = language;
        }

        if let Some(format) = args.format {
            self.default_format = format;
        }

        self
    }

    /// Get the URL for an API path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), path)
    }
}
