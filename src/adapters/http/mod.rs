//! HTTP adapters - REST API implementations.

pub mod orchestration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use orchestration::{orchestration_router, OrchestrationAppState};

/// Builds the complete application router with timeout, tracing and CORS layers.
///
/// Requests running past `server.request_timeout_secs` are answered with
/// `408 Request Timeout`. CORS is permissive unless `server.cors_origins`
/// lists explicit origins.
pub fn app_router(state: OrchestrationAppState, server: &ServerConfig) -> Router {
    orchestration_router()
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
