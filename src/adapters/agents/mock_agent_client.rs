//! Mock Agent Client for testing.
//!
//! Returns queued outcomes keyed by tool id and records every call, so
//! orchestration tests run without agent servers.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::foundation::RequestContext;
use crate::domain::orchestration::{ToolCall, ToolOutcome};
use crate::ports::AgentClient;

/// Mock agent client.
///
/// Calls with no queued outcome succeed with `{"status": "ok"}`.
#[derive(Debug, Clone, Default)]
pub struct MockAgentClient {
    outcomes: Arc<Mutex<HashMap<String, VecDeque<Result<Value, String>>>>>,
    calls: Arc<Mutex<Vec<ToolCall>>>,
    delay: Duration,
}

impl MockAgentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result for `tool_id` (`category.tool`).
    pub fn with_result(self, tool_id: impl Into<String>, result: Value) -> Self {
        self.push(tool_id.into(), Ok(result));
        self
    }

    /// Queues a failure for `tool_id`.
    pub fn with_failure(self, tool_id: impl Into<String>, error: impl Into<String>) -> Self {
        self.push(tool_id.into(), Err(error.into()));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls received so far, in order.
    pub fn get_calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, tool_id: String, outcome: Result<Value, String>) {
        self.outcomes
            .lock()
            .unwrap()
            .entry(tool_id)
            .or_default()
            .push_back(outcome);
    }

    fn next_outcome(&self, tool_id: &str) -> Result<Value, String> {
        self.outcomes
            .lock()
            .unwrap()
            .get_mut(tool_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(json!({"status": "ok"})))
    }
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn execute(&self, call: &ToolCall, _ctx: &RequestContext) -> ToolOutcome {
        self.calls.lock().unwrap().push(call.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let tool_id = call.tool_id();
        match self.next_outcome(&tool_id) {
            Ok(result) => ToolOutcome::success(tool_id, result),
            Err(error) => ToolOutcome::failure(tool_id, error),
        }
    }
}
