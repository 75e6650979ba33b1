//! Application handlers.
//!
//! Coordinate domain logic and ports for a single orchestrated request.

pub mod orchestration;

pub use orchestration::{
    ClassificationError, ClassifierConfig, IntentClassifier, Orchestrator, PipelineConfig,
    ResponseSynthesizer, SynthesisError, SynthesizerConfig,
};
