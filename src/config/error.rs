//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: String, value: String },

    #[error("Agent {0} declares no tools")]
    NoTools(String),

    #[error("Retry count must be at least 1")]
    InvalidRetryCount,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,
}
