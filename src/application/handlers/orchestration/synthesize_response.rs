//! ResponseSynthesizer - turns tool outcomes into the final reply.
//!
//! The outcomes (successes and failures) are rendered into a context block,
//! embedded in the system prompt, and sent with the recent history and the
//! user's message as a single completion request. On failure a fixed apology
//! carrying the raw error is returned instead.

use std::fmt::Write as _;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::RequestContext;
use crate::domain::orchestration::{ConversationTurn, Intent, ToolOutcome, TurnRole};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Failure of the synthesis completion call.
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

/// Generation settings for synthesis requests.
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Most recent history turns forwarded to the provider.
    pub history_limit: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            history_limit: 10,
        }
    }
}

/// Produces the natural-language answer for a request.
pub struct ResponseSynthesizer {
    provider: Arc<dyn AIProvider>,
    config: SynthesizerConfig,
}

impl ResponseSynthesizer {
    pub fn new(provider: Arc<dyn AIProvider>, config: SynthesizerConfig) -> Self {
        Self { provider, config }
    }

    /// Synthesize the reply. Never fails.
    pub async fn synthesize(
        &self,
        message: &str,
        intent: &Intent,
        outcomes: &[ToolOutcome],
        history: &[ConversationTurn],
        ctx: &RequestContext,
    ) -> String {
        match self
            .try_synthesize(message, intent, outcomes, history, ctx)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    trace_id = ctx.trace_id(),
                    error = %err,
                    "Response synthesis failed, returning apology"
                );
                fallback_response(&err)
            }
        }
    }

    async fn try_synthesize(
        &self,
        message: &str,
        intent: &Intent,
        outcomes: &[ToolOutcome],
        history: &[ConversationTurn],
        ctx: &RequestContext,
    ) -> Result<String, SynthesisError> {
        let mut request = CompletionRequest::new(ctx.trace_id())
            .with_system_prompt(system_prompt(intent, outcomes))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);
        if let Some(remaining) = ctx.remaining() {
            request = request.with_timeout(remaining);
        }

        let skip = history.len().saturating_sub(self.config.history_limit);
        for turn in &history[skip..] {
            request = request.with_message(role_for(turn.role), &turn.content);
        }
        request = request.with_message(MessageRole::User, message);

        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(SynthesisError::EmptyResponse);
        }
        Ok(response.content)
    }
}

/// Apology returned when synthesis fails.
pub fn fallback_response(err: &SynthesisError) -> String {
    format!(
        "I apologize, but I encountered an error while generating a response: {}",
        err
    )
}

fn role_for(role: TurnRole) -> MessageRole {
    match role {
        TurnRole::User => MessageRole::User,
        TurnRole::Assistant => MessageRole::Assistant,
    }
}

fn system_prompt(intent: &Intent, outcomes: &[ToolOutcome]) -> String {
    format!(
        "You are a helpful marketplace assistant. You answer questions about listings, \
         advertising and stock using the results of specialized backend agents.\n\n\
         Detected intent: {} (confidence {:.2})\n\n\
         {}\n\
         Answer the user's message using the tool results above. If a tool failed, \
         say so plainly and suggest what the user can do next. If no tools were used, \
         respond helpfully from the message alone.",
        intent.category_label(),
        intent.confidence,
        context_block(outcomes)
    )
}

/// Renders the outcomes as a numbered list.
pub fn context_block(outcomes: &[ToolOutcome]) -> String {
    if outcomes.is_empty() {
        return "No tools were used for this request.\n".to_string();
    }

    let mut block = String::from("Tool results:\n");
    for (i, outcome) in outcomes.iter().enumerate() {
        if outcome.success {
            let payload = outcome
                .result
                .as_ref()
                .and_then(|r| serde_json::to_string_pretty(r).ok())
                .unwrap_or_else(|| "null".to_string());
            let _ = writeln!(block, "{}. {}: SUCCESS\n{}", i + 1, outcome.tool, payload);
        } else {
            let error = outcome.error.as_deref().unwrap_or("unknown error");
            let _ = writeln!(block, "{}. {}: FAILED - {}", i + 1, outcome.tool, error);
        }
    }
    block
}
