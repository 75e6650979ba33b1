//! HTTP handlers for orchestration endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::Orchestrator;
use crate::domain::orchestration::{AgentCatalog, OrchestrationResult};

use super::dto::{AgentListResponse, AgentResponse, ErrorResponse, HealthResponse, OrchestrateRequest};

/// Header carrying a caller-supplied trace id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
#[derive(Clone)]
pub struct OrchestrationAppState {
    pub orchestrator: Arc<Orchestrator>,
    pub catalog: Arc<AgentCatalog>,
}

impl OrchestrationAppState {
    pub fn new(orchestrator: Arc<Orchestrator>, catalog: Arc<AgentCatalog>) -> Self {
        Self {
            orchestrator,
            catalog,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/orchestrate - Run one message through the pipeline
pub async fn orchestrate(
    State(state): State<OrchestrationAppState>,
    headers: HeaderMap,
    Json(request): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrationResult>, OrchestrationApiError> {
    if request.message.trim().is_empty() {
        return Err(OrchestrationApiError::BadRequest(
            "message cannot be empty".to_string(),
        ));
    }

    let mut ctx = state.orchestrator.new_context();
    if let Some(trace_id) = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        ctx = ctx.with_trace_id(trace_id);
    }

    let result = state
        .orchestrator
        .process_with_context(&request.message, &request.history, ctx)
        .await;

    Ok(Json(result))
}

/// GET /api/agents - List the agent catalog
pub async fn list_agents(State(state): State<OrchestrationAppState>) -> Json<AgentListResponse> {
    Json(AgentListResponse {
        agents: state.catalog.descriptors().map(AgentResponse::from).collect(),
    })
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type.
#[derive(Debug)]
pub enum OrchestrationApiError {
    BadRequest(String),
}

impl IntoResponse for OrchestrationApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            OrchestrationApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(msg))).into_response()
            }
        }
    }
}
