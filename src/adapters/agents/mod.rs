//! Agent Client Adapters.
//!
//! - `HttpAgentClient` - JSON over HTTP with linear backoff
//! - `MockAgentClient` - Queued outcomes for testing
//! - `TokioSleeper` / `RecordingSleeper` - Backoff sleepers

mod http_agent_client;
mod mock_agent_client;
mod sleepers;

pub use http_agent_client::{AgentClientConfig, HttpAgentClient};
pub use mock_agent_client::MockAgentClient;
pub use sleepers::{RecordingSleeper, TokioSleeper};
