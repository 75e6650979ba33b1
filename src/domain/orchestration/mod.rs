//! Orchestration Domain Module
//!
//! Pure routing logic for marketplace requests: the agent catalog, keyword
//! rule tables, deterministic intent classification and tool routing.
//! Nothing in here performs I/O; network-backed steps live in the
//! application layer behind ports.
//!
//! # Architecture
//!
//! - **AgentCatalog**: read-only registry of agents and their tools
//! - **RuleBasedIntentClassifier**: keyword fallback classifier
//! - **ToolRouter**: selects a concrete tool call for an intent
//! - **Values**: Intent, ToolCall, ToolOutcome, OrchestrationResult

pub mod catalog;
pub mod intent_classifier;
pub mod keyword_rules;
pub mod tool_router;
pub mod values;

pub use catalog::*;
pub use intent_classifier::*;
pub use keyword_rules::{default_tools, first_match, KeywordRule, ToolRuleSet, CATEGORY_RULES};
pub use tool_router::*;
pub use values::*;
