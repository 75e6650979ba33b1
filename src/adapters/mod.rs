//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion providers (OpenAI wire format, mock)
//! - `agents` - Backend agent clients (HTTP, mock) and backoff sleepers
//! - `http` - Inbound REST API (axum)

pub mod agents;
pub mod ai;
pub mod http;

pub use agents::{AgentClientConfig, HttpAgentClient, MockAgentClient, RecordingSleeper, TokioSleeper};
pub use ai::{MockAIProvider, MockResponse, OpenAIConfig, OpenAIProvider};
