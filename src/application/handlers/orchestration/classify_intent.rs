//! IntentClassifier - remote classification with keyword fallback.
//!
//! One completion request per message. Any failure of the remote path
//! (provider error, malformed JSON, missing `category`) degrades to the
//! deterministic keyword rules, so `classify` never fails.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{AgentCategory, RequestContext};
use crate::domain::orchestration::{
    Intent, IntentRules, RuleBasedIntentClassifier, NO_MATCH_CONFIDENCE,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

const CLASSIFICATION_PROMPT: &str = r#"You are an intent classifier for a marketplace assistant.
Decide which backend agent should handle the user's message:

- "database": searching listings, listing statistics, category statistics, a user's own listings
- "advertising": optimizing titles and descriptions, price suggestions, marketing and SEO
- "stock": stock levels, low-stock alerts, restocking, inventory summaries

If none applies, use "none".

Respond with JSON only, in exactly this shape:
{"category": "database|advertising|stock|none", "confidence": 0.0-1.0, "required_tools": ["tool_name"], "reasoning": "short explanation"}"#;

/// Failure of the remote classification path.
#[derive(Debug, Clone, Error)]
pub enum ClassificationError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("Classifier returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Classifier response missing field: {0}")]
    MissingField(&'static str),
}

/// Generation settings for classification requests.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

/// Classifies messages into an agent category.
pub struct IntentClassifier {
    provider: Option<Arc<dyn AIProvider>>,
    rules: RuleBasedIntentClassifier,
    config: ClassifierConfig,
}

impl IntentClassifier {
    /// Classifier that asks the provider first and falls back to keyword rules.
    pub fn new(provider: Arc<dyn AIProvider>, config: ClassifierConfig) -> Self {
        Self {
            provider: Some(provider),
            rules: RuleBasedIntentClassifier,
            config,
        }
    }

    /// Classifier that only applies the keyword rules.
    pub fn rules_only() -> Self {
        Self {
            provider: None,
            rules: RuleBasedIntentClassifier,
            config: ClassifierConfig::default(),
        }
    }

    /// Classify a message. Never fails.
    pub async fn classify(&self, message: &str, ctx: &RequestContext) -> Intent {
        let Some(provider) = &self.provider else {
            return self.rules.classify(message);
        };

        match self.classify_remote(provider.as_ref(), message, ctx).await {
            Ok(intent) => {
                tracing::debug!(
                    trace_id = ctx.trace_id(),
                    category = intent.category_label(),
                    confidence = intent.confidence,
                    "Remote classification succeeded"
                );
                intent
            }
            Err(err) => {
                tracing::warn!(
                    trace_id = ctx.trace_id(),
                    error = %err,
                    "Remote classification failed, using keyword rules"
                );
                self.rules.classify(message)
            }
        }
    }

    async fn classify_remote(
        &self,
        provider: &dyn AIProvider,
        message: &str,
        ctx: &RequestContext,
    ) -> Result<Intent, ClassificationError> {
        let mut request = CompletionRequest::new(ctx.trace_id())
            .with_system_prompt(CLASSIFICATION_PROMPT)
            .with_message(MessageRole::User, message)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);
        if let Some(remaining) = ctx.remaining() {
            request = request.with_timeout(remaining);
        }

        let response = provider.complete(request).await?;
        parse_intent(&response.content)
    }
}

/// Parses the classifier's JSON reply.
///
/// `category` must be present; an unknown or `"none"` category maps to no
/// category. Missing confidence defaults to 0.5, missing reasoning to "".
pub fn parse_intent(content: &str) -> Result<Intent, ClassificationError> {
    let value: Value = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| ClassificationError::InvalidJson(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ClassificationError::InvalidJson("expected a JSON object".to_string()))?;

    let category = match obj.get("category") {
        None => return Err(ClassificationError::MissingField("category")),
        Some(Value::String(s)) => s.parse::<AgentCategory>().ok(),
        Some(_) => None,
    };

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(NO_MATCH_CONFIDENCE);

    let required_tools = obj
        .get("required_tools")
        .and_then(Value::as_array)
        .map(|tools| {
            tools
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let reasoning = obj
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(Intent::new(category, confidence, required_tools, reasoning))
}

/// Unwraps a Markdown code fence (with or without a language tag).
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // drop the language tag line, if any
    match inner.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with('{') => rest.trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    fn classifier(provider: MockAIProvider) -> IntentClassifier {
        IntentClassifier::new(Arc::new(provider), ClassifierConfig::default())
    }

    #[test]
    fn parses_full_reply() {
        let intent = parse_intent(
            r#"{"category": "stock", "confidence": 0.92, "required_tools": ["check_stock_levels"], "reasoning": "asks about inventory"}"#,
        )
        .unwrap();

        assert_eq!(intent.category, Some(AgentCategory::Stock));
        assert_eq!(intent.confidence, 0.92);
        assert_eq!(intent.required_tools, vec!["check_stock_levels".to_string()]);
        assert_eq!(intent.reasoning, "asks about inventory");
    }

    #[test]
    fn none_and_unknown_categories_map_to_no_category() {
        assert_eq!(parse_intent(r#"{"category": "none"}"#).unwrap().category, None);
        assert_eq!(parse_intent(r#"{"category": "weather"}"#).unwrap().category, None);
        assert_eq!(parse_intent(r#"{"category": null}"#).unwrap().category, None);
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let intent = parse_intent(r#"{"category": "database"}"#).unwrap();
        assert_eq!(intent.confidence, 0.5);
        assert!(intent.required_tools.is_empty());
        assert_eq!(intent.reasoning, "");
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        let intent = parse_intent(r#"{"category": "database", "confidence": 3.5}"#).unwrap();
        assert_eq!(intent.confidence, 1.0);
    }

    #[test]
    fn missing_category_is_an_error() {
        let err = parse_intent(r#"{"confidence": 0.9}"#).unwrap_err();
        assert!(matches!(err, ClassificationError::MissingField("category")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_intent("I think this is about stock").unwrap_err(),
            ClassificationError::InvalidJson(_)
        ));
        assert!(matches!(
            parse_intent("[1, 2]").unwrap_err(),
            ClassificationError::InvalidJson(_)
        ));
    }

    #[test]
    fn code_fences_are_unwrapped() {
        let fenced = "```json\n{\"category\": \"advertising\", \"confidence\": 0.8}\n```";
        assert_eq!(
            parse_intent(fenced).unwrap().category,
            Some(AgentCategory::Advertising)
        );

        let bare = "```\n{\"category\": \"stock\"}\n```";
        assert_eq!(parse_intent(bare).unwrap().category, Some(AgentCategory::Stock));
    }

    #[tokio::test]
    async fn uses_remote_classification_when_available() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"category": "stock", "confidence": 0.95, "reasoning": "inventory"}"#);
        let classifier = classifier(provider.clone());

        let intent = classifier
            .classify("hello there", &RequestContext::new().with_trace_id("trace-1"))
            .await;

        assert_eq!(intent.category, Some(AgentCategory::Stock));
        assert_eq!(intent.confidence, 0.95);

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].trace_id, "trace-1");
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].content, "hello there");
        assert!(calls[0].system_prompt.as_deref().unwrap().contains("\"category\""));
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_keywords() {
        let provider = MockAIProvider::new().with_error(AIError::unavailable("down"));
        let classifier = classifier(provider);

        let intent = classifier
            .classify("search for iphone listings", &RequestContext::new())
            .await;

        assert_eq!(intent.category, Some(AgentCategory::Database));
        assert_eq!(intent.confidence, 0.7);
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_to_keywords() {
        let provider = MockAIProvider::new().with_response("not json at all");
        let classifier = classifier(provider);

        let intent = classifier.classify("hello there", &RequestContext::new()).await;

        assert_eq!(intent.category, None);
        assert_eq!(intent.confidence, 0.5);
    }

    #[tokio::test]
    async fn rules_only_classifier_makes_no_remote_call() {
        let intent = IntentClassifier::rules_only()
            .classify("check inventory for bikes", &RequestContext::new())
            .await;

        assert_eq!(intent.category, Some(AgentCategory::Stock));
    }

    #[tokio::test]
    async fn passes_remaining_budget_as_timeout() {
        let provider = MockAIProvider::new().with_response(r#"{"category": "database"}"#);
        let classifier = classifier(provider.clone());
        let ctx = RequestContext::new().with_timeout(std::time::Duration::from_secs(10));

        classifier.classify("find bikes", &ctx).await;

        let timeout = provider.get_calls()[0].timeout.unwrap();
        assert!(timeout <= std::time::Duration::from_secs(10));
    }
}
