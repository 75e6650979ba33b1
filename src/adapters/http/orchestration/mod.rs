//! HTTP adapter for the orchestrator.
//!
//! # Endpoints
//!
//! - `POST /api/orchestrate` - Classify, dispatch and answer one message
//! - `GET /api/agents` - List the agent catalog
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrchestrationAppState;
pub use routes::orchestration_router;
