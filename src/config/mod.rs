//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Sources are layered, later ones winning:
//!
//! 1. `.env` file if present (development)
//! 2. Optional file named by `ORCHESTRATOR_CONFIG_FILE` (TOML, YAML or JSON)
//! 3. Environment variables with the `ORCHESTRATOR` prefix, `__` separating
//!    nested values
//!
//! # Example
//!
//! ```no_run
//! use marketplace_orchestrator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod agents;
mod ai;
mod error;
mod orchestrator;
mod server;

pub use agents::{AgentEntryConfig, AgentsConfig};
pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use orchestrator::OrchestratorConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_VAR: &str = "ORCHESTRATOR_CONFIG_FILE";

const ENV_PREFIX: &str = "ORCHESTRATOR";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion endpoint used for classification and synthesis
    #[serde(default)]
    pub ai: AiConfig,

    /// Agent catalog
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Pipeline settings
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, the optional config file and the environment
    ///
    /// # Environment Variable Format
    ///
    /// - `ORCHESTRATOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ORCHESTRATOR__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `ORCHESTRATOR__AGENTS__STOCK__TOOLS=a,b` -> `agents.stock.tools = ["a", "b"]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or values cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_VAR).ok();
        Self::load_with_file(file.as_deref().map(Path::new))
    }

    /// Load configuration from an explicit file (if any) plus the environment
    pub fn load_with_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("agents.advertising.tools")
                    .with_list_parse_key("agents.database.tools")
                    .with_list_parse_key("agents.stock.tools"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.agents.validate()?;
        self.orchestrator.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

/// Configured endpoints must be absolute http(s) URLs with a host.
pub(crate) fn is_http_url(value: &str) -> bool {
    match reqwest::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
