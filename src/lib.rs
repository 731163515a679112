pub mod ai; // Classification + outreach email drafting
pub mod api; // HTTP surface
pub mod config;
pub mod models;
pub mod outreach; // List-source policy + template store
pub mod pipeline; // Enrichment orchestrator
pub mod providers; // Specter (primary) + Apollo (fallback)

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::ai::{AiError, OpenAiClient, OutreachWriter};
use crate::config::{AppConfig, ConfigError};
use crate::outreach::ListSourcePolicy;
use crate::pipeline::EnrichmentPipeline;
use crate::providers::{ApolloClient, ProviderError, SpecterClient};

/// Anything that stops the service from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider client setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Language model client setup failed: {0}")]
    Ai(#[from] AiError),

    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Wire the real provider and model clients into a pipeline.
pub fn build_pipeline(config: &AppConfig) -> Result<EnrichmentPipeline, StartupError> {
    let primary = Arc::new(SpecterClient::new(&config.specter)?);
    let fallback = Arc::new(ApolloClient::new(&config.apollo)?);
    let llm = Arc::new(OpenAiClient::new(&config.openai)?);

    tracing::info!(
        specter = primary.base_url(),
        apollo = fallback.base_url(),
        model = llm.model(),
        fallback_enabled = config.fallback_enabled,
        ai_draft_enabled = config.openai.draft_enabled,
        "Enrichment pipeline configured"
    );

    Ok(EnrichmentPipeline::new(
        primary,
        fallback,
        OutreachWriter::new(llm, config.openai.draft_enabled),
        ListSourcePolicy::default(),
    )
    .with_fallback_enabled(config.fallback_enabled))
}

/// Serve the API until Ctrl-C / SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Blocking reqwest clients are built off the async worker threads.
    let pipeline_config = config.clone();
    let pipeline = tokio::task::spawn_blocking(move || build_pipeline(&pipeline_config))
        .await
        .map_err(|e| StartupError::Server(format!("pipeline setup task failed: {e}")))??;

    let app = api::api_router(Arc::new(pipeline), config.request_timeout);
    let mut server = api::start_api_server(app, config.bind_addr)
        .await
        .map_err(StartupError::Server)?;

    tracing::info!(addr = %server.addr, "Listening");

    api::server::termination_signal().await;
    server.shutdown();
    server.stopped().await;
    Ok(())
}
