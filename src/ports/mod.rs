//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the orchestration logic and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Remote text completion (classification and synthesis)
//! - `AgentClient` - Tool execution against backend agents
//! - `Sleeper` - Backoff suspension between retry attempts

mod agent_client;
mod ai_provider;
mod sleeper;

pub use agent_client::{AgentCallError, AgentClient};
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo,
};
pub use sleeper::Sleeper;
