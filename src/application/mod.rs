//! Application layer - request handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ClassificationError, ClassifierConfig, IntentClassifier, Orchestrator, PipelineConfig,
    ResponseSynthesizer, SynthesisError, SynthesizerConfig,
};
