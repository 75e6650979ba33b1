//! Marketplace Orchestrator server entry point.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marketplace_orchestrator::adapters::agents::{AgentClientConfig, HttpAgentClient};
use marketplace_orchestrator::adapters::ai::{OpenAIConfig, OpenAIProvider};
use marketplace_orchestrator::adapters::http::{app_router, OrchestrationAppState};
use marketplace_orchestrator::application::{
    ClassifierConfig, IntentClassifier, Orchestrator, PipelineConfig, ResponseSynthesizer,
    SynthesizerConfig,
};
use marketplace_orchestrator::config::{AppConfig, ValidationError};
use marketplace_orchestrator::domain::orchestration::ToolRouter;
use marketplace_orchestrator::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    config.validate()?;
    tracing::info!(
        environment = ?config.server.environment,
        model = %config.ai.model,
        "Configuration loaded"
    );

    let catalog = Arc::new(config.agents.catalog());
    for agent in catalog.descriptors() {
        tracing::info!(
            category = %agent.category,
            base_url = %agent.base_url,
            tools = agent.tools.len(),
            "Registered agent"
        );
    }

    let api_key = config
        .ai
        .api_key
        .as_ref()
        .ok_or(ValidationError::MissingRequired("ai.api_key"))?;
    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key.expose_secret().clone())
            .with_model(config.ai.model.clone())
            .with_endpoint_url(config.ai.endpoint_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?);
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Completion provider ready");

    let agents = HttpAgentClient::new(
        catalog.clone(),
        AgentClientConfig::default()
            .with_timeout(config.orchestrator.agent_timeout())
            .with_max_retries(config.orchestrator.max_retries)
            .with_backoff_unit(config.orchestrator.backoff_unit()),
    )?;

    let orchestrator = Orchestrator::new(
        IntentClassifier::new(
            provider.clone(),
            ClassifierConfig {
                max_tokens: config.ai.classification_max_tokens,
                temperature: config.ai.classification_temperature,
            },
        ),
        ToolRouter::new(catalog.clone()),
        Arc::new(agents),
        ResponseSynthesizer::new(
            provider,
            SynthesizerConfig {
                max_tokens: config.ai.synthesis_max_tokens,
                temperature: config.ai.synthesis_temperature,
                history_limit: config.orchestrator.history_limit,
            },
        ),
        PipelineConfig {
            parallel_tool_calls: config.orchestrator.parallel_tool_calls,
            request_deadline: config.orchestrator.request_deadline(),
        },
    );

    let state = OrchestrationAppState::new(Arc::new(orchestrator), catalog);
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Marketplace orchestrator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact text otherwise. `RUST_LOG` wins over
/// `server.log_level`.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let json = config.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().compact()))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
