//! HTTP DTOs for orchestration endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AgentCategory;
use crate::domain::orchestration::{AgentDescriptor, ConversationTurn};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to orchestrate one user message.
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestrateRequest {
    /// The user's free-form message.
    pub message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub category: AgentCategory,
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub tools: Vec<String>,
}

impl From<&AgentDescriptor> for AgentResponse {
    fn from(d: &AgentDescriptor) -> Self {
        Self {
            category: d.category,
            name: d.name.clone(),
            description: d.description.clone(),
            base_url: d.base_url.clone(),
            tools: d.tools.clone(),
        }
    }
}

/// Response for the agent listing.
#[derive(Debug, Clone, Serialize)]
pub struct AgentListResponse {
    pub agents: Vec<AgentResponse>,
}

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::orchestration::TurnRole;

    #[test]
    fn request_history_defaults_to_empty() {
        let request: OrchestrateRequest =
            serde_json::from_str(r#"{"message": "hello there"}"#).unwrap();
        assert_eq!(request.message, "hello there");
        assert!(request.history.is_empty());
    }

    #[test]
    fn request_parses_history() {
        let request: OrchestrateRequest = serde_json::from_str(
            r#"{"message": "and now?", "history": [{"role": "user", "content": "hi"}, {"role": "assistant", "content": "hello"}]}"#,
        )
        .unwrap();
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[1].role, TurnRole::Assistant);
    }

    #[test]
    fn error_response_serializes() {
        let json = serde_json::to_value(ErrorResponse::bad_request("empty")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "empty");
    }
}
