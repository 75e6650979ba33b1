//! Agent Client Port - Interface for executing tool calls on backend agents.
//!
//! # Design
//!
//! - `execute` never fails: every failure mode resolves to a `ToolOutcome`
//!   with `success = false` and a descriptive error
//! - Transport errors are typed (`AgentCallError`) until they are folded
//!   into an outcome, so retry decisions are made on the type, not on strings
//!
//! # Retry classification
//!
//! | Response                                   | Class     |
//! |--------------------------------------------|-----------|
//! | 200 without `error`                        | success   |
//! | 200 with `error`                           | retryable |
//! | 200 with `error` and `"retryable": false`  | terminal  |
//! | 5xx, timeout, connection failure           | retryable |
//! | 4xx                                        | terminal  |

use async_trait::async_trait;

use crate::domain::foundation::{AgentCategory, RequestContext};
use crate::domain::orchestration::{ToolCall, ToolOutcome};

/// Port for dispatching a single tool call to its agent.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Execute the call with the client's configured retry budget.
    async fn execute(&self, call: &ToolCall, ctx: &RequestContext) -> ToolOutcome;
}

/// Failure of a single attempt against an agent endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentCallError {
    /// Attempt exceeded its timeout.
    #[error("Request failed: timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Could not reach the agent.
    #[error("Request failed: {0}")]
    Connection(String),

    /// Agent answered with a 5xx status.
    #[error("Agent server error {status}: {body}")]
    Server { status: u16, body: String },

    /// Agent answered with a 4xx status.
    #[error("Agent rejected request with status {status}: {body}")]
    Client { status: u16, body: String },

    /// Agent answered with a status outside 2xx, 4xx and 5xx.
    #[error("Unexpected agent status {status}")]
    UnexpectedStatus { status: u16 },

    /// Agent answered 200 with an `error` field.
    #[error("Agent error: {message}")]
    Agent { message: String, retryable: bool },

    /// Agent answered 200 with a body that is not JSON.
    #[error("Invalid agent response: {0}")]
    Parse(String),

    /// No catalog entry for the call's category.
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentCategory),

    /// The request deadline leaves no room for another attempt.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl AgentCallError {
    /// Returns true if another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentCallError::Timeout { .. }
            | AgentCallError::Connection(_)
            | AgentCallError::Server { .. }
            | AgentCallError::Parse(_) => true,
            AgentCallError::Agent { retryable, .. } => *retryable,
            AgentCallError::Client { .. }
            | AgentCallError::UnexpectedStatus { .. }
            | AgentCallError::UnknownAgent(_)
            | AgentCallError::DeadlineExceeded => false,
        }
    }
}
