//! HTTP Agent Client - Implementation of AgentClient over JSON/HTTP.
//!
//! Each tool call is a `POST {base_url}/process` with body
//! `{"query": ..., "context": {...parameters}}`. Agents answer 200 with either
//! `{"result": ...}` or `{"error": "..."}`.
//!
//! # Retry state machine
//!
//! ```text
//! Attempting(1) --retryable--> sleep 1 unit --> Attempting(2) --retryable--> sleep 2 units --> ...
//! Attempting(n) --success------> Succeeded
//! Attempting(n) --terminal-----> Failed (no retry)
//! Attempting(max) --retryable--> Exhausted ("Failed after {max} attempts ...")
//! ```
//!
//! Backoff is linear in the attempt number. No sleep follows the final attempt.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::RequestContext;
use crate::domain::orchestration::{AgentCatalog, ToolCall, ToolOutcome};
use crate::ports::{AgentCallError, AgentClient, Sleeper};

use super::sleepers::TokioSleeper;

/// Configuration for the HTTP agent client.
#[derive(Debug, Clone)]
pub struct AgentClientConfig {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Maximum attempts per tool call.
    pub max_retries: u32,
    /// Backoff before attempt `n + 1` is `n * backoff_unit`.
    pub backoff_unit: Duration,
}

impl Default for AgentClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl AgentClientConfig {
    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum attempt count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff unit.
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Delay inserted after failed attempt `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

/// Agent client speaking the `/process` JSON protocol.
pub struct HttpAgentClient {
    catalog: Arc<AgentCatalog>,
    client: Client,
    sleeper: Arc<dyn Sleeper>,
    config: AgentClientConfig,
}

impl HttpAgentClient {
    /// Creates a client that sleeps on the tokio timer between attempts.
    pub fn new(catalog: Arc<AgentCatalog>, config: AgentClientConfig) -> Result<Self, AgentCallError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AgentCallError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            catalog,
            client,
            sleeper: Arc::new(TokioSleeper),
            config,
        })
    }

    /// Replaces the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Execute a call with an explicit attempt budget.
    ///
    /// Never fails; every failure resolves to an unsuccessful `ToolOutcome`.
    /// A budget of zero is treated as one attempt.
    pub async fn execute_with_retries(
        &self,
        call: &ToolCall,
        max_retries: u32,
        ctx: &RequestContext,
    ) -> ToolOutcome {
        let tool_id = call.tool_id();
        let trace_id = ctx.trace_id();

        let Some(agent) = self.catalog.get(call.category) else {
            let err = AgentCallError::UnknownAgent(call.category);
            tracing::error!(trace_id, tool = %tool_id, "Tool call targets an unknown agent");
            return ToolOutcome::failure(tool_id, err.to_string());
        };

        let url = agent.process_url();
        let body = AgentRequest {
            query: call.query(),
            context: &call.parameters,
        };
        let max_retries = max_retries.max(1);
        let mut last_error = AgentCallError::DeadlineExceeded;

        for attempt in 1..=max_retries {
            tracing::debug!(trace_id, tool = %tool_id, attempt, url = %url, "Calling agent");

            match self.attempt(&url, &body, ctx).await {
                Ok(result) => {
                    tracing::info!(trace_id, tool = %tool_id, attempt, "Agent call succeeded");
                    return ToolOutcome::success(tool_id, result);
                }
                Err(err) if !err.is_retryable() => {
                    tracing::warn!(
                        trace_id,
                        tool = %tool_id,
                        attempt,
                        error = %err,
                        "Agent call failed terminally"
                    );
                    return ToolOutcome::failure(
                        tool_id.clone(),
                        format!("{} (agent {}, attempt {})", err, tool_id, attempt),
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        trace_id,
                        tool = %tool_id,
                        attempt,
                        max_retries,
                        error = %err,
                        "Agent call failed, will retry"
                    );
                    last_error = err;
                }
            }

            if attempt < max_retries {
                let delay = self.config.backoff_for(attempt);
                if matches!(ctx.remaining(), Some(remaining) if remaining <= delay) {
                    tracing::warn!(trace_id, tool = %tool_id, attempt, "Deadline leaves no room for backoff");
                    return ToolOutcome::failure(
                        tool_id.clone(),
                        format!(
                            "{} after {} attempts calling {}; last error: {}",
                            AgentCallError::DeadlineExceeded,
                            attempt,
                            tool_id,
                            last_error
                        ),
                    );
                }
                self.sleeper.sleep(delay).await;
            }
        }

        tracing::error!(trace_id, tool = %tool_id, max_retries, error = %last_error, "Agent retries exhausted");
        ToolOutcome::failure(
            tool_id.clone(),
            format!(
                "Failed after {} attempts calling {}: {}",
                max_retries, tool_id, last_error
            ),
        )
    }

    /// One HTTP round trip, classified into success or a typed failure.
    async fn attempt(
        &self,
        url: &str,
        body: &AgentRequest<'_>,
        ctx: &RequestContext,
    ) -> Result<Value, AgentCallError> {
        let timeout = ctx.bounded_timeout(self.config.timeout);
        if timeout.is_zero() {
            return Err(AgentCallError::DeadlineExceeded);
        }

        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        let status = response.status();

        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentCallError::Server {
                status: status.as_u16(),
                body,
            });
        }

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentCallError::Client {
                status: status.as_u16(),
                body,
            });
        }

        if !status.is_success() {
            return Err(AgentCallError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| AgentCallError::Parse(e.to_string()))?;

        parse_agent_body(value)
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn execute(&self, call: &ToolCall, ctx: &RequestContext) -> ToolOutcome {
        self.execute_with_retries(call, self.config.max_retries, ctx)
            .await
    }
}

fn classify_transport_error(err: reqwest::Error, timeout: Duration) -> AgentCallError {
    if err.is_timeout() {
        AgentCallError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        AgentCallError::Connection(err.to_string())
    }
}

/// Interprets a 200 body.
///
/// Any `error` key, even `null`, is an agent failure, retryable unless the
/// body also says `"retryable": false`. Otherwise `result` is unwrapped when
/// present and the whole body is the payload when it is not.
fn parse_agent_body(value: Value) -> Result<Value, AgentCallError> {
    if let Value::Object(ref obj) = value {
        if let Some(error) = obj.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                Value::Null => "agent reported an error without details".to_string(),
                other => other.to_string(),
            };
            let retryable = obj
                .get("retryable")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            return Err(AgentCallError::Agent { message, retryable });
        }

        if let Some(result) = obj.get("result") {
            return Ok(result.clone());
        }
    }

    Ok(value)
}

// ----- Agent API Types -----

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    query: &'a str,
    context: &'a Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::agents::RecordingSleeper;
    use crate::domain::foundation::AgentCategory;
    use crate::domain::orchestration::{default_tools, AgentDescriptor};
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Hits = Arc<AtomicUsize>;

    async fn spawn_agent(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Base URL nothing is listening on.
    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn catalog_for(category: AgentCategory, base_url: &str) -> Arc<AgentCatalog> {
        Arc::new(AgentCatalog::new(vec![AgentDescriptor::new(
            category,
            category.display_name(),
            base_url,
            "test agent",
            default_tools(category),
        )]))
    }

    fn client(catalog: Arc<AgentCatalog>, sleeper: &RecordingSleeper) -> HttpAgentClient {
        HttpAgentClient::new(catalog, AgentClientConfig::default())
            .unwrap()
            .with_sleeper(Arc::new(sleeper.clone()))
    }

    fn search_call() -> ToolCall {
        ToolCall::with_query(
            AgentCategory::Database,
            "search_listings",
            "search for iphone listings",
            "Listings matching the query",
        )
    }

    fn counting_router<F>(hits: Hits, respond: F) -> Router
    where
        F: Fn(usize) -> Response + Clone + Send + Sync + 'static,
    {
        Router::new()
            .route(
                "/process",
                post(move |State(hits): State<Hits>| {
                    let respond = respond.clone();
                    async move {
                        let n = hits.fetch_add(1, Ordering::SeqCst);
                        respond(n)
                    }
                }),
            )
            .with_state(hits)
    }

    #[test]
    fn backoff_is_linear() {
        let config = AgentClientConfig::default();
        assert_eq!(config.backoff_for(1), Duration::from_secs(1));
        assert_eq!(config.backoff_for(2), Duration::from_secs(2));
        assert_eq!(config.backoff_for(3), Duration::from_secs(3));
    }

    #[test]
    fn parse_agent_body_unwraps_result() {
        let value = parse_agent_body(json!({"result": {"count": 2}})).unwrap();
        assert_eq!(value, json!({"count": 2}));
    }

    #[test]
    fn parse_agent_body_returns_whole_body_without_result() {
        let body = json!({"items": [1, 2, 3]});
        assert_eq!(parse_agent_body(body.clone()).unwrap(), body);
    }

    #[test]
    fn parse_agent_body_treats_null_error_as_failure() {
        let err = parse_agent_body(json!({"error": null, "result": 5})).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("without details"), "{}", err);
    }

    #[test]
    fn parse_agent_body_error_is_retryable_by_default() {
        let err = parse_agent_body(json!({"error": "busy"})).unwrap_err();
        assert_eq!(
            err,
            AgentCallError::Agent {
                message: "busy".into(),
                retryable: true
            }
        );
    }

    #[test]
    fn parse_agent_body_honours_non_retryable_flag() {
        let err = parse_agent_body(json!({"error": "bad id", "retryable": false})).unwrap_err();
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn success_on_first_attempt_unwraps_result() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            Json(json!({"result": {"count": 2, "results": ["a", "b"]}})).into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(outcome.success);
        assert_eq!(outcome.tool, "database.search_listings");
        assert_eq!(outcome.result, Some(json!({"count": 2, "results": ["a", "b"]})));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn sends_query_and_context() {
        let router = Router::new().route(
            "/process",
            post(|Json(body): Json<Value>| async move { Json(json!({ "result": body })) }),
        );
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        let echoed = outcome.result.unwrap();
        assert_eq!(echoed["query"], "search for iphone listings");
        assert_eq!(echoed["context"]["query"], "search for iphone listings");
    }

    #[tokio::test]
    async fn server_errors_retry_until_exhausted() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        let error = outcome.error.unwrap();
        assert!(error.contains("Failed after 3 attempts"), "{}", error);
        assert!(error.contains("database.search_listings"), "{}", error);
        assert!(error.contains("503"), "{}", error);
        assert_eq!(
            sleeper.sleeps(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            (StatusCode::NOT_FOUND, "no such tool").into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(outcome.error.unwrap().contains("404"));
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn agent_error_field_is_retried_then_succeeds() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |n| {
            if n == 0 {
                Json(json!({"error": "index warming up"})).into_response()
            } else {
                Json(json!({"result": "ok"})).into_response()
            }
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(outcome.success);
        assert_eq!(outcome.result, Some(json!("ok")));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn null_error_field_is_retried_not_accepted() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |n| {
            if n == 0 {
                Json(json!({"error": null, "result": "stale"})).into_response()
            } else {
                Json(json!({"result": "fresh"})).into_response()
            }
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(outcome.success);
        assert_eq!(outcome.result, Some(json!("fresh")));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn non_json_body_is_retried_as_parse_failure() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            (StatusCode::OK, "<html>gateway page</html>").into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        let error = outcome.error.unwrap();
        assert!(error.contains("Failed after 3 attempts"), "{}", error);
        assert_eq!(
            sleeper.sleeps(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn non_retryable_agent_error_stops_immediately() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            Json(json!({"error": "listing id must be numeric", "retryable": false})).into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(outcome.error.unwrap().contains("listing id must be numeric"));
    }

    #[tokio::test]
    async fn connection_refused_is_retried_and_reported() {
        let base = closed_port_url().await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        let error = outcome.error.unwrap();
        assert!(error.contains("Failed after 3 attempts"), "{}", error);
        assert!(error.contains("Request failed"), "{}", error);
        assert_eq!(sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn explicit_retry_budget_is_respected() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            StatusCode::BAD_GATEWAY.into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);

        let outcome = client
            .execute_with_retries(&search_call(), 5, &RequestContext::new())
            .await;

        assert!(outcome.error.unwrap().contains("Failed after 5 attempts"));
        assert_eq!(hits.load(Ordering::SeqCst), 5);
        assert_eq!(
            sleeper.sleeps(),
            (1..=4).map(Duration::from_secs).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn slow_agent_times_out() {
        let hits = Hits::default();
        let router = Router::new()
            .route(
                "/process",
                post(|State(hits): State<Hits>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Json(json!({"result": "late"}))
                }),
            )
            .with_state(hits.clone());
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = HttpAgentClient::new(
            catalog_for(AgentCategory::Database, &base),
            AgentClientConfig::default()
                .with_timeout(Duration::from_millis(50))
                .with_max_retries(2),
        )
        .unwrap()
        .with_sleeper(Arc::new(sleeper.clone()));

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        let error = outcome.error.unwrap();
        assert!(error.contains("Failed after 2 attempts"), "{}", error);
        assert!(error.contains("timed out"), "{}", error);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn deadline_stops_retries_before_backoff_overruns_it() {
        let hits = Hits::default();
        let router = counting_router(hits.clone(), |_| {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        });
        let base = spawn_agent(router).await;
        let sleeper = RecordingSleeper::new();
        let client = client(catalog_for(AgentCategory::Database, &base), &sleeper);
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(1500));

        let outcome = client.execute(&search_call(), &ctx).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("deadline exceeded"));
        // 1s backoff fits the budget, 2s does not
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn unknown_agent_fails_without_network_call() {
        let sleeper = RecordingSleeper::new();
        let client = client(Arc::new(AgentCatalog::default()), &sleeper);

        let outcome = client.execute(&search_call(), &RequestContext::new()).await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Unknown agent: database"));
    }
}
