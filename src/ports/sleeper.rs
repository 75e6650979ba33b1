//! Sleeper port - suspension used between retry attempts.
//!
//! Injected so backoff schedules can be asserted without waiting on a real clock.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current task for a duration.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
