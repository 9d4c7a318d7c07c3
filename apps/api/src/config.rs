use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which embedding function backs the template index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Offline feature-hashing embedder. No credentials needed.
    Local,
    /// OpenAI-compatible `/embeddings` endpoint.
    OpenAi { api_key: String, model: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the persisted template index (`index.json`).
    pub template_index_dir: PathBuf,
    /// Upper bound on a single content-generation call.
    pub generation_timeout: Duration,
    pub embedding_provider: EmbeddingProvider,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generation_timeout_secs = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_index_dir: std::env::var("TEMPLATE_INDEX_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./template_index")),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            embedding_provider: embedding_provider_from_env()?,
        })
    }
}

fn embedding_provider_from_env() -> Result<EmbeddingProvider> {
    let provider = std::env::var("EMBEDDING_PROVIDER").unwrap_or_else(|_| "local".to_string());
    parse_embedding_provider(
        &provider,
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("EMBEDDING_MODEL").ok(),
    )
}

fn parse_embedding_provider(
    provider: &str,
    openai_api_key: Option<String>,
    model: Option<String>,
) -> Result<EmbeddingProvider> {
    match provider.trim().to_ascii_lowercase().as_str() {
        "local" | "" => Ok(EmbeddingProvider::Local),
        "openai" => {
            let api_key = openai_api_key
                .filter(|k| !k.trim().is_empty())
                .context("OPENAI_API_KEY is required when EMBEDDING_PROVIDER=openai")?;
            Ok(EmbeddingProvider::OpenAi {
                api_key,
                model: model.unwrap_or_else(|| "text-embedding-3-small".to_string()),
            })
        }
        other => bail!("Unknown EMBEDDING_PROVIDER '{other}' (expected 'local' or 'openai')"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
