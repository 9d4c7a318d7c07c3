//! In-memory similarity index over embedded template documents.
//!
//! Persisted as `<dir>/index.json`. Documents are embedded once when the index is
//! built; queries embed only the query string.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::templates::corpus::TemplateDocument;
use crate::templates::embedder::{Embedder, EmbeddingError};

const INDEX_FILE: &str = "index.json";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Index IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Vector dimension {actual} does not match embedder dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    document: TemplateDocument,
    vector: Vec<f32>,
}

/// On-disk layout of a persisted index.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    embedder: String,
    dimension: usize,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

/// A document with its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTemplate {
    pub document: TemplateDocument,
    pub score: f32,
}

/// Nearest-neighbour index over template documents.
///
/// Must only be queried with the embedder it was built with. Immutable after
/// construction, so shared references can be used from any number of requests.
pub struct TemplateIndex {
    embedder: Arc<dyn Embedder>,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

impl TemplateIndex {
    /// Embeds every document and builds a fresh index.
    pub async fn build(
        documents: Vec<TemplateDocument>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, TemplateError> {
        let texts: Vec<String> = documents.iter().map(|d| d.embedding_text()).collect();
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&text_refs).await?;

        let expected = embedder.dimension();
        let mut entries = Vec::with_capacity(documents.len());
        for (document, vector) in documents.into_iter().zip(vectors) {
            if vector.len() != expected {
                return Err(TemplateError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            entries.push(IndexEntry { document, vector });
        }

        Ok(Self {
            embedder,
            built_at: Utc::now(),
            entries,
        })
    }

    /// Loads a persisted index from `dir`.
    ///
    /// Fails when the file is absent, unreadable, or its vectors do not fit the
    /// embedder's dimension. A different embedder id is only logged.
    pub async fn load(dir: &Path, embedder: Arc<dyn Embedder>) -> Result<Self, TemplateError> {
        let raw = tokio::fs::read(index_path(dir)).await?;
        let persisted: PersistedIndex = serde_json::from_slice(&raw)?;

        let expected = embedder.dimension();
        if persisted.dimension != expected {
            return Err(TemplateError::DimensionMismatch {
                expected,
                actual: persisted.dimension,
            });
        }
        if let Some(bad) = persisted.entries.iter().find(|e| e.vector.len() != expected) {
            return Err(TemplateError::DimensionMismatch {
                expected,
                actual: bad.vector.len(),
            });
        }
        if persisted.embedder != embedder.id() {
            warn!(
                "Template index at {} was built with '{}' but is queried with '{}'",
                dir.display(),
                persisted.embedder,
                embedder.id()
            );
        }

        Ok(Self {
            embedder,
            built_at: persisted.built_at,
            entries: persisted.entries,
        })
    }

    /// Writes the index to `<dir>/index.json`, creating `dir` if needed.
    /// The file is replaced atomically via a temporary sibling.
    pub async fn save(&self, dir: &Path) -> Result<(), TemplateError> {
        let persisted = PersistedIndex {
            embedder: self.embedder.id(),
            dimension: self.embedder.dimension(),
            built_at: self.built_at,
            entries: self.entries.clone(),
        };
        let bytes = serde_json::to_vec(&persisted)?;

        tokio::fs::create_dir_all(dir).await?;
        let tmp = dir.join(format!("{INDEX_FILE}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, index_path(dir)).await?;
        Ok(())
    }

    /// Returns at most `k` documents, most similar first.
    pub async fn nearest_neighbors(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<TemplateDocument>, TemplateError> {
        Ok(self
            .search(query, k)
            .await?
            .into_iter()
            .map(|s| s.document)
            .collect())
    }

    /// Like `nearest_neighbors`, keeping the cosine similarity of each hit.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredTemplate>, TemplateError> {
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;
        if query_vector.len() != self.embedder.dimension() {
            return Err(TemplateError::DimensionMismatch {
                expected: self.embedder.dimension(),
                actual: query_vector.len(),
            });
        }

        let mut scored: Vec<ScoredTemplate> = self
            .entries
            .iter()
            .map(|entry| ScoredTemplate {
                document: entry.document.clone(),
                score: cosine_similarity(&query_vector, &entry.vector),
            })
            .collect();
        // Stable sort: ties keep corpus order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(
            "Template search '{}': {:?}",
            query,
            scored
                .iter()
                .map(|s| (s.document.field_label.as_str(), s.score))
                .collect::<Vec<_>>()
        );
        Ok(scored)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::corpus::seed_corpus;
    use crate::templates::embedder::HashingEmbedder;

    fn embedder() -> Arc<dyn Embedder> {
        Arc::new(HashingEmbedder::default())
    }

    async fn seeded() -> TemplateIndex {
        TemplateIndex::build(seed_corpus(), embedder()).await.unwrap()
    }

    #[tokio::test]
    async fn test_finance_query_returns_finance_template() {
        let index = seeded().await;
        let hits = index
            .nearest_neighbors("Resume template for Finance", 1)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field_label, "Finance");
    }

    #[tokio::test]
    async fn test_every_seed_field_retrieves_itself() {
        let index = seeded().await;
        for field in ["Software Engineering", "Data Science", "Marketing", "Finance"] {
            let hits = index
                .nearest_neighbors(&format!("Resume template for {field}"), 1)
                .await
                .unwrap();
            assert_eq!(hits[0].field_label, field, "query for {field}");
        }
    }

    #[tokio::test]
    async fn test_k_zero_returns_empty() {
        let index = seeded().await;
        assert!(index
            .nearest_neighbors("Resume template for Finance", 0)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_returns_empty() {
        let index = TemplateIndex::build(Vec::new(), embedder()).await.unwrap();
        assert!(index.is_empty());
        assert!(index
            .nearest_neighbors("Resume template for Finance", 3)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_k_larger_than_corpus_is_capped() {
        let index = seeded().await;
        let hits = index.search("Resume template for Marketing", 10).await.unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].document.field_label, "Marketing");
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_persist_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let built = seeded().await;
        built.save(dir.path()).await.unwrap();

        let loaded = TemplateIndex::load(dir.path(), embedder()).await.unwrap();
        assert_eq!(loaded.len(), built.len());
        assert_eq!(loaded.built_at(), built.built_at());

        for query in [
            "Resume template for Finance",
            "Resume template for Data Science",
            "Resume template for Other",
        ] {
            for k in [1, 2, 4] {
                assert_eq!(
                    built.nearest_neighbors(query, k).await.unwrap(),
                    loaded.nearest_neighbors(query, k).await.unwrap(),
                    "query={query} k={k}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_load_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateIndex::load(&dir.path().join("absent"), embedder()).await;
        assert!(matches!(result, Err(TemplateError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_FILE), b"not json").unwrap();
        let result = TemplateIndex::load(dir.path(), embedder()).await;
        assert!(matches!(result, Err(TemplateError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_load_with_other_dimension_fails() {
        let dir = tempfile::tempdir().unwrap();
        seeded().await.save(dir.path()).await.unwrap();
        let narrow: Arc<dyn Embedder> = Arc::new(HashingEmbedder::new(16));
        let result = TemplateIndex::load(dir.path(), narrow).await;
        assert!(matches!(
            result,
            Err(TemplateError::DimensionMismatch { expected: 16, .. })
        ));
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }
}
