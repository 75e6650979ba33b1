//! Orchestrator - runs one message through the full pipeline.
//!
//! `Received -> Classified -> Routed -> Executed -> Synthesized -> Completed`
//!
//! Stages are never retried; only the agent client retries inside
//! `Executed`. Classification and synthesis failures are absorbed by their
//! fallbacks. The request deadline is the one condition that aborts the
//! pipeline, producing a result with `success = false`.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::RequestContext;
use crate::domain::orchestration::{
    ConversationTurn, OrchestrationResult, ToolCall, ToolOutcome, ToolRouter,
};
use crate::ports::AgentClient;

use super::classify_intent::IntentClassifier;
use super::synthesize_response::ResponseSynthesizer;

/// Reply used when the pipeline does not finish within the request deadline.
pub const DEADLINE_APOLOGY: &str =
    "I apologize, but I couldn't complete your request in time. Please try again.";

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Run a request's tool calls concurrently. Outcome order is preserved.
    pub parallel_tool_calls: bool,
    /// Budget for the whole pipeline; `None` disables the deadline.
    pub request_deadline: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel_tool_calls: false,
            request_deadline: Some(Duration::from_secs(120)),
        }
    }
}

/// Coordinates classification, routing, execution and synthesis.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Orchestrator {
    classifier: IntentClassifier,
    router: ToolRouter,
    agents: Arc<dyn AgentClient>,
    synthesizer: ResponseSynthesizer,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(
        classifier: IntentClassifier,
        router: ToolRouter,
        agents: Arc<dyn AgentClient>,
        synthesizer: ResponseSynthesizer,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            router,
            agents,
            synthesizer,
            config,
        }
    }

    /// Fresh context carrying the configured request deadline.
    pub fn new_context(&self) -> RequestContext {
        let ctx = RequestContext::new();
        match self.config.request_deadline {
            Some(deadline) => ctx.with_timeout(deadline),
            None => ctx,
        }
    }

    /// Process a message with a fresh context and the configured deadline.
    pub async fn process(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> OrchestrationResult {
        self.process_with_context(message, history, self.new_context())
            .await
    }

    /// Process a message under a caller-supplied context.
    pub async fn process_with_context(
        &self,
        message: &str,
        history: &[ConversationTurn],
        ctx: RequestContext,
    ) -> OrchestrationResult {
        tracing::info!(trace_id = ctx.trace_id(), "Request received");

        let Some(remaining) = ctx.remaining() else {
            return self.run(message, history, &ctx).await;
        };

        match tokio::time::timeout(remaining, self.run(message, history, &ctx)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(trace_id = ctx.trace_id(), "Request deadline exceeded");
                OrchestrationResult::failed(DEADLINE_APOLOGY, "Request deadline exceeded")
            }
        }
    }

    async fn run(
        &self,
        message: &str,
        history: &[ConversationTurn],
        ctx: &RequestContext,
    ) -> OrchestrationResult {
        let trace_id = ctx.trace_id();

        let intent = self.classifier.classify(message, ctx).await;
        tracing::info!(
            trace_id,
            category = intent.category_label(),
            confidence = intent.confidence,
            "Classified"
        );

        let calls = self.router.route(&intent, message);
        tracing::info!(
            trace_id,
            tools = ?calls.iter().map(ToolCall::tool_id).collect::<Vec<_>>(),
            "Routed"
        );

        let outcomes = self.execute_all(&calls, ctx).await;
        tracing::info!(
            trace_id,
            succeeded = outcomes.iter().filter(|o| o.success).count(),
            failed = outcomes.iter().filter(|o| !o.success).count(),
            "Executed"
        );

        let response = self
            .synthesizer
            .synthesize(message, &intent, &outcomes, history, ctx)
            .await;
        tracing::info!(trace_id, "Synthesized");

        OrchestrationResult::completed(response, outcomes, intent)
    }

    /// Outcomes are returned in call order regardless of execution mode.
    async fn execute_all(&self, calls: &[ToolCall], ctx: &RequestContext) -> Vec<ToolOutcome> {
        if self.config.parallel_tool_calls {
            return join_all(calls.iter().map(|call| self.agents.execute(call, ctx))).await;
        }

        let mut outcomes = Vec::with_capacity(calls.len());
        for call in calls {
            outcomes.push(self.agents.execute(call, ctx).await);
        }
        outcomes
    }
}
