//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and identifiers that form the vocabulary
//! of the orchestration domain.

mod agent_category;
mod request_context;

pub use agent_category::{AgentCategory, UnknownCategory};
pub use request_context::RequestContext;
