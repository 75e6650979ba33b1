//! Value Objects for the Orchestration Domain
//!
//! These types are created per request, never mutated after construction,
//! and discarded once the result has been handed back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::AgentCategory;

/// Confidence assigned when a keyword rule matched.
pub const KEYWORD_MATCH_CONFIDENCE: f64 = 0.7;

/// Confidence assigned when no keyword rule matched.
pub const NO_MATCH_CONFIDENCE: f64 = 0.5;

/// Structured guess at which agent a message needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Target agent; `None` when the message matched no agent.
    pub category: Option<AgentCategory>,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub required_tools: Vec<String>,
    pub reasoning: String,
}

impl Intent {
    /// Creates an intent, clamping the confidence into [0, 1].
    pub fn new(
        category: Option<AgentCategory>,
        confidence: f64,
        required_tools: Vec<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            category,
            confidence,
            required_tools,
            reasoning: reasoning.into(),
        }
    }

    /// Intent for a message that matched no agent.
    pub fn unrecognized(reasoning: impl Into<String>) -> Self {
        Self::new(None, NO_MATCH_CONFIDENCE, Vec::new(), reasoning)
    }

    /// Category label used in summaries ("none" when unrecognized).
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.as_str()).unwrap_or("none")
    }
}

/// A single parameterized invocation of one tool on one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub category: AgentCategory,
    pub tool_name: String,
    /// JSON object; always contains `query`.
    pub parameters: Map<String, Value>,
    pub expected_result: String,
}

impl ToolCall {
    /// Creates a call whose parameters are `{"query": query}`.
    pub fn with_query(
        category: AgentCategory,
        tool_name: impl Into<String>,
        query: impl Into<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        let mut parameters = Map::new();
        parameters.insert("query".to_string(), Value::String(query.into()));

        Self {
            category,
            tool_name: tool_name.into(),
            parameters,
            expected_result: expected_result.into(),
        }
    }

    /// Identifier in `category.tool` form.
    pub fn tool_id(&self) -> String {
        format!("{}.{}", self.category, self.tool_name)
    }

    /// The `query` parameter, or an empty string when absent.
    pub fn query(&self) -> &str {
        self.parameters
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Result of executing one ToolCall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Identifier in `category.tool` form.
    pub tool: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn success(tool: impl Into<String>, result: Value) -> Self {
        Self {
            tool: tool.into(),
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(tool: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Who authored a history turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One prior message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Terminal artifact returned to the caller for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub success: bool,
    pub response: String,
    /// Exactly the `tool` of every successful entry in `tool_results`, in order.
    pub tools_used: Vec<String>,
    pub tool_results: Vec<ToolOutcome>,
    pub intent_analysis: Option<Intent>,
    pub reasoning: String,
}

impl OrchestrationResult {
    /// Assembles a completed result; `tools_used` is derived from the outcomes.
    pub fn completed(response: impl Into<String>, outcomes: Vec<ToolOutcome>, intent: Intent) -> Self {
        let tools_used = outcomes
            .iter()
            .filter(|o| o.success)
            .map(|o| o.tool.clone())
            .collect();
        let reasoning = format!(
            "Analyzed as {} with {} confidence",
            intent.category_label(),
            intent.confidence
        );

        Self {
            success: true,
            response: response.into(),
            tools_used,
            tool_results: outcomes,
            intent_analysis: Some(intent),
            reasoning,
        }
    }

    /// Result substituted when the pipeline itself could not complete.
    pub fn failed(response: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
            tools_used: Vec::new(),
            tool_results: Vec::new(),
            intent_analysis: None,
            reasoning: reasoning.into(),
        }
    }
}
