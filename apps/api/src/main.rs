mod config;
mod errors;
mod generation;
mod llm_client;
mod render;
mod resume;
mod routes;
mod state;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EmbeddingProvider};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::{Embedder, HashingEmbedder, OpenAiEmbedder, TemplateRetriever};

const EMBEDDING_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.generation_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize template retrieval (index is loaded or built on first use)
    let embedder = build_embedder(&config)?;
    info!(
        "Template embedder: {} ({} dims), index dir {}",
        embedder.id(),
        embedder.dimension(),
        config.template_index_dir.display()
    );
    let templates = Arc::new(TemplateRetriever::new(
        config.template_index_dir.clone(),
        embedder,
    ));

    // Warm the index in the background so the first request does not pay for it.
    // A failure here is retried by the next request that needs the index.
    let warm = templates.clone();
    tokio::spawn(async move {
        if let Err(e) = warm.index().await {
            warn!("Template index warm-up failed: {e}");
        }
    });

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        templates,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Chooses the embedding function for the template index.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match &config.embedding_provider {
        EmbeddingProvider::Local => Arc::new(HashingEmbedder::default()),
        EmbeddingProvider::OpenAi { api_key, model } => Arc::new(OpenAiEmbedder::new(
            api_key.clone(),
            model.clone(),
            EMBEDDING_HTTP_TIMEOUT,
        )?),
    };
    Ok(embedder)
}
