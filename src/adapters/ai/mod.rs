//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - Chat-completions endpoints (OpenAI wire format)

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
