//! Completion endpoint configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::is_http_url;

/// Completion endpoint configuration, shared by classification and synthesis
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Bearer token for the completion endpoint
    pub api_key: Option<SecretString>,

    /// Chat-completions URL
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Provider-level retries on retryable errors
    #[serde(default)]
    pub max_retries: u32,

    #[serde(default = "default_classification_max_tokens")]
    pub classification_max_tokens: u32,

    #[serde(default = "default_classification_temperature")]
    pub classification_temperature: f32,

    #[serde(default = "default_synthesis_max_tokens")]
    pub synthesis_max_tokens: u32,

    #[serde(default = "default_synthesis_temperature")]
    pub synthesis_temperature: f32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ai.api_key"));
        }
        if !is_http_url(&self.endpoint_url) {
            return Err(ValidationError::InvalidUrl {
                field: "ai.endpoint_url".to_string(),
                value: self.endpoint_url.clone(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("ai.timeout_secs"));
        }
        for temperature in [self.classification_temperature, self.synthesis_temperature] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint_url: default_endpoint_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            classification_max_tokens: default_classification_max_tokens(),
            classification_temperature: default_classification_temperature(),
            synthesis_max_tokens: default_synthesis_max_tokens(),
            synthesis_temperature: default_synthesis_temperature(),
        }
    }
}

fn default_endpoint_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_classification_max_tokens() -> u32 {
    500
}

fn default_classification_temperature() -> f32 {
    0.1
}

fn default_synthesis_max_tokens() -> u32 {
    1000
}

fn default_synthesis_temperature() -> f32 {
    0.7
}
