//! Server configuration, read once at startup

use crate::HttpApiConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use ticketify_connector_openai::{OpenAiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use ticketify_core::errors::CoreError;
use ticketify_core::Language;

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["ticketify.yaml", "ticketify.yml"];

/// Configuration for `ticketify-server`.
///
/// Sources, lowest precedence first: built-in defaults, a YAML file,
/// `CEREBRAS_*` variables for the upstream, `PORT`, then `TICKETIFY_*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Upstream API base URL
    pub base_url: String,
    /// Upstream model name
    pub model: String,
    /// Upstream API key
    pub api_key: Option<String>,
    /// Upstream request timeout; unset keeps the transport default
    pub timeout_ms: Option<u64>,
    /// Answer language requested from the model
    pub language: Language,
    /// Allow cross-origin browser requests
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_ms: None,
            language: Language::Spanish,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, CoreError> {
        Self::figment(config_path)?
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    fn figment(config_path: Option<&Path>) -> Result<Figment, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        match config_path {
            Some(path) if path.exists() => figment = figment.merge(Yaml::file(path)),
            Some(path) => {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )))
            }
            None => {
                if let Some(path) = DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
                    figment = figment.merge(Yaml::file(path));
                }
            }
        }

        Ok(figment
            .merge(Env::prefixed("CEREBRAS_").only(&["base_url", "model", "api_key", "timeout_ms"]))
            .merge(Env::raw().only(&["port"]))
            .merge(Env::prefixed("TICKETIFY_").only(&["host", "language", "enable_cors"])))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> Result<SocketAddr, CoreError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            CoreError::Configuration(format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
        })
    }

    /// Settings for the upstream connector
    pub fn connector_config(&self) -> OpenAiConfig {
        let mut config = OpenAiConfig::new(self.api_key.clone().unwrap_or_default())
            .with_api_base(self.base_url.clone())
            .with_model(self.model.clone())
            .with_language(self.language);
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout(timeout_ms);
        }
        config
    }

    /// Settings for the HTTP layer
    pub fn http_config(&self) -> Result<HttpApiConfig, CoreError> {
        Ok(HttpApiConfig {
            bind_address: self.bind_address()?,
            enable_cors: self.enable_cors,
        })
    }
}
