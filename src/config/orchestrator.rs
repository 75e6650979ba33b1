//! Pipeline configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Orchestrator configuration (agent calls, history, deadline)
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorConfig {
    /// Per-attempt agent timeout in seconds
    #[serde(default = "default_agent_timeout")]
    pub agent_timeout_secs: u64,

    /// Attempts per tool call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Linear backoff unit in milliseconds
    #[serde(default = "default_backoff_unit")]
    pub backoff_unit_ms: u64,

    /// History turns forwarded to synthesis
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Run a request's tool calls concurrently
    #[serde(default)]
    pub parallel_tool_calls: bool,

    /// Whole-pipeline deadline in seconds; 0 disables it
    #[serde(default = "default_request_deadline")]
    pub request_deadline_secs: u64,
}

impl OrchestratorConfig {
    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }

    pub fn request_deadline(&self) -> Option<Duration> {
        (self.request_deadline_secs > 0).then(|| Duration::from_secs(self.request_deadline_secs))
    }

    /// Validate orchestrator configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.agent_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("orchestrator.agent_timeout_secs"));
        }
        if self.max_retries == 0 {
            return Err(ValidationError::InvalidRetryCount);
        }
        Ok(())
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            agent_timeout_secs: default_agent_timeout(),
            max_retries: default_max_retries(),
            backoff_unit_ms: default_backoff_unit(),
            history_limit: default_history_limit(),
            parallel_tool_calls: false,
            request_deadline_secs: default_request_deadline(),
        }
    }
}

fn default_agent_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_unit() -> u64 {
    1000
}

fn default_history_limit() -> usize {
    10
}

fn default_request_deadline() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_defaults() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.agent_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_unit(), Duration::from_secs(1));
        assert_eq!(config.history_limit, 10);
        assert!(!config.parallel_tool_calls);
        assert_eq!(config.request_deadline(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_zero_deadline_disables_it() {
        let config = OrchestratorConfig {
            request_deadline_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_deadline(), None);
    }

    #[test]
    fn test_validation() {
        assert!(OrchestratorConfig::default().validate().is_ok());

        let no_retries = OrchestratorConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(no_retries.validate(), Err(ValidationError::InvalidRetryCount));

        let no_timeout = OrchestratorConfig {
            agent_timeout_secs: 0,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());
    }
}
