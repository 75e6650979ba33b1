//! Route configuration for orchestration endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, list_agents, orchestrate, OrchestrationAppState};

/// Creates the orchestration router.
///
/// Routes:
/// - `POST /api/orchestrate` - Orchestrate one message
/// - `GET /api/agents` - List the agent catalog
/// - `GET /health` - Liveness probe
pub fn orchestration_router() -> Router<OrchestrationAppState> {
    Router::new()
        .route("/api/orchestrate", post(orchestrate))
        .route("/api/agents", get(list_agents))
        .route("/health", get(health))
}
