//! Orchestration handlers.
//!
//! - `IntentClassifier` - remote classification with keyword fallback
//! - `ResponseSynthesizer` - final reply from tool outcomes
//! - `Orchestrator` - the end-to-end pipeline

mod classify_intent;
mod process_request;
mod synthesize_response;

pub use classify_intent::{parse_intent, ClassificationError, ClassifierConfig, IntentClassifier};
pub use process_request::{Orchestrator, PipelineConfig, DEADLINE_APOLOGY};
pub use synthesize_response::{
    context_block, fallback_response, ResponseSynthesizer, SynthesisError, SynthesizerConfig,
};
