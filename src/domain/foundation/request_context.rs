//! Per-request context carried through every network call site.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// Trace identifier and optional deadline for a single orchestrated request.
///
/// The deadline bounds classification, every agent attempt (including backoff
/// sleeps), and synthesis. A context without a deadline never expires.
#[derive(Debug, Clone)]
pub struct RequestContext {
    trace_id: String,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with a fresh trace id and no deadline.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            deadline: None,
        }
    }

    /// Sets the trace id (e.g. propagated from an inbound request header).
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Sets a deadline `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Clamps a per-call timeout to the remaining budget.
    pub fn bounded_timeout(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(remaining) => timeout.min(remaining),
            None => timeout,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_no_deadline() {
        let ctx = RequestContext::new();
        assert!(ctx.remaining().is_none());
        assert!(!ctx.trace_id().is_empty());
    }

    #[test]
    fn trace_ids_are_unique() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert_ne!(a.trace_id(), b.trace_id());
    }

    #[test]
    fn bounded_timeout_without_deadline_is_unchanged() {
        let ctx = RequestContext::new();
        assert_eq!(
            ctx.bounded_timeout(Duration::from_secs(30)),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn bounded_timeout_clamps_to_remaining() {
        let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
        assert!(ctx.bounded_timeout(Duration::from_secs(30)) <= Duration::from_secs(5));
    }

    #[test]
    fn spent_budget_leaves_no_time() {
        let ctx = RequestContext::new().with_timeout(Duration::ZERO);
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert_eq!(ctx.bounded_timeout(Duration::from_secs(30)), Duration::ZERO);
    }

    #[test]
    fn with_trace_id_overrides_generated_id() {
        let ctx = RequestContext::new().with_trace_id("trace-123");
        assert_eq!(ctx.trace_id(), "trace-123");
    }
}
