//! Embedding functions for the template index.
//!
//! The index and its queries must use the same embedder. `id()` is written into the
//! persisted index so a mismatch can at least be noticed in the logs.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding API returned {actual} vectors for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },
}

/// Turns a string into a fixed-dimension vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier of the embedding function (model + parameters).
    fn id(&self) -> String;

    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// The default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local feature-hashing embedder
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_HASHING_DIMENSION: usize = 4096;

/// Words that carry no field signal. "resume" and "template" appear in every
/// retrieval query, so they are dropped along with ordinary English stop words.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it",
    "of", "on", "or", "the", "to", "with", "resume", "template",
];

/// Offline embedder: bag of words hashed into a fixed number of buckets.
///
/// Tokens are lowercase alphanumeric runs, bucketed with CRC32 so vectors are
/// identical across processes and platforms. Term weights are `1 + ln(tf)` and
/// the result is L2-normalized.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIMENSION)
    }
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for token in tokenize(text) {
            let bucket = crc32fast::hash(token.as_bytes()) as usize % self.dimension;
            *counts.entry(bucket).or_insert(0) += 1;
        }

        let mut vector = vec![0.0_f32; self.dimension];
        for (bucket, tf) in counts {
            vector[bucket] = 1.0 + (tf as f32).ln();
        }
        l2_normalize(&mut vector);
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn id(&self) -> String {
        format!("hashing-crc32-d{}", self.dimension)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_sync(text))
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
}

fn l2_normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for v in vector.iter_mut() {
            *v /= magnitude;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible embedder
// ────────────────────────────────────────────────────────────────────────────

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const MAX_RETRIES: u32 = 3;

/// Async client for OpenAI-compatible `/embeddings` endpoints.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        anyhow::ensure!(!api_key.trim().is_empty(), "missing OpenAI API key");
        anyhow::ensure!(!model.trim().is_empty(), "missing OpenAI model name");
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build OpenAI HTTP client")?;
        let dimension = openai_model_dimension(&model);
        Ok(Self {
            client,
            api_key,
            model,
            dimension,
        })
    }

    async fn request(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: inputs,
        };

        let mut last_error: Option<EmbeddingError> = None;
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(500 * (1 << attempt));
                warn!(
                    "Embedding request attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(OPENAI_EMBEDDINGS_URL)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
                continue;
            }
            if !status.is_success() {
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            let mut parsed: EmbeddingResponse = response.json().await?;
            parsed.data.sort_by_key(|entry| entry.index);
            if parsed.data.len() != inputs.len() {
                return Err(EmbeddingError::CountMismatch {
                    expected: inputs.len(),
                    actual: parsed.data.len(),
                });
            }
            return Ok(parsed.data.into_iter().map(|d| d.embedding).collect());
        }

        Err(last_error.unwrap_or(EmbeddingError::Api {
            status: 429,
            message: format!("gave up after {MAX_RETRIES} attempts"),
        }))
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn id(&self) -> String {
        format!("openai-{}", self.model)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.request(&[text]).await?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}

/// Output width of the known OpenAI embedding models.
fn openai_model_dimension(model: &str) -> usize {
    match model {
        "text-embedding-3-large" => 3072,
        _ => 1536,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens: Vec<String> = tokenize("Resume template for Finance, a CFA-level role").collect();
        assert_eq!(tokens, vec!["finance", "cfa", "level", "role"]);
    }

    #[tokio::test]
    async fn test_hashing_embedder_is_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("Senior Financial Analyst").await.unwrap();
        let b = embedder.embed("Senior Financial Analyst").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_HASHING_DIMENSION);
    }

    #[tokio::test]
    async fn test_hashing_embedder_normalizes() {
        let embedder = HashingEmbedder::new(64);
        let v = embedder.embed("python python rust go").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new(32);
        let v = embedder.embed("for the a").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn test_shared_words_score_higher() {
        let embedder = HashingEmbedder::default();
        let query = embedder.embed("marketing campaigns").await.unwrap();
        let close = embedder
            .embed("Managed digital marketing campaigns")
            .await
            .unwrap();
        let far = embedder.embed("Built RESTful APIs in Rust").await.unwrap();
        assert!(dot(&query, &close) > dot(&query, &far));
    }

    #[tokio::test]
    async fn test_default_batch_matches_single_calls() {
        let embedder = HashingEmbedder::new(128);
        let batch = embedder.embed_batch(&["alpha beta", "gamma"]).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], embedder.embed("gamma").await.unwrap());
    }

    #[test]
    fn test_embedder_id_encodes_dimension() {
        assert_eq!(HashingEmbedder::new(512).id(), "hashing-crc32-d512");
    }

    #[test]
    fn test_openai_embedder_rejects_blank_key() {
        assert!(OpenAiEmbedder::new(
            " ".to_string(),
            "text-embedding-3-small".to_string(),
            Duration::from_secs(5)
        )
        .is_err());
    }

    #[test]
    fn test_openai_model_dimension() {
        assert_eq!(openai_model_dimension("text-embedding-3-large"), 3072);
        assert_eq!(openai_model_dimension("text-embedding-3-small"), 1536);
    }
}
