//! Keyword-based intent classification.
//!
//! Deterministic classifier used on its own or as the fallback when remote
//! classification fails.

use super::keyword_rules::{first_match, CATEGORY_RULES};
use super::values::{Intent, KEYWORD_MATCH_CONFIDENCE, NO_MATCH_CONFIDENCE};

/// Classifies user intent from message content without network access.
pub trait IntentRules: Send + Sync {
    fn classify(&self, message: &str) -> Intent;
}

/// Simple rule-based intent classifier (default implementation)
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedIntentClassifier;

impl IntentRules for RuleBasedIntentClassifier {
    fn classify(&self, message: &str) -> Intent {
        match first_match(CATEGORY_RULES, message) {
            Some(category) => Intent::new(
                Some(category),
                KEYWORD_MATCH_CONFIDENCE,
                Vec::new(),
                format!("Keyword match for {} agent", category),
            ),
            None => Intent::new(
                None,
                NO_MATCH_CONFIDENCE,
                Vec::new(),
                "No agent keywords found in message",
            ),
        }
    }
}
