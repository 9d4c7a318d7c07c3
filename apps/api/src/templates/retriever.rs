//! Process-wide access to the template index.
//!
//! The index is loaded (or built from the seed corpus) on first use, exactly once,
//! and shared read-only afterwards. A failed initialization is not cached: the next
//! caller tries again, and meanwhile retrieval reports "unavailable".

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::templates::corpus::{seed_corpus, TemplateDocument};
use crate::templates::embedder::Embedder;
use crate::templates::index::{TemplateError, TemplateIndex};

/// Template text used when retrieval produced nothing.
pub const FALLBACK_TEMPLATE: &str = "Generic resume template.";

/// Builds the retrieval query for a job field.
pub fn template_query(field_label: &str) -> String {
    format!("Resume template for {field_label}")
}

pub struct TemplateRetriever {
    dir: PathBuf,
    embedder: Arc<dyn Embedder>,
    index: OnceCell<TemplateIndex>,
}

impl TemplateRetriever {
    pub fn new(dir: PathBuf, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            dir,
            embedder,
            index: OnceCell::new(),
        }
    }

    /// Returns the shared index, loading or building it on first call.
    pub async fn index(&self) -> Result<&TemplateIndex, TemplateError> {
        self.index
            .get_or_try_init(|| load_or_build(&self.dir, self.embedder.clone()))
            .await
    }

    /// Nearest templates for a job field. Retrieval problems are logged and
    /// reported as an empty result.
    pub async fn templates_for(&self, field_label: &str, k: usize) -> Vec<TemplateDocument> {
        let index = match self.index().await {
            Ok(index) => index,
            Err(e) => {
                warn!("Template index unavailable: {e}");
                return Vec::new();
            }
        };
        match index.nearest_neighbors(&template_query(field_label), k).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Template lookup for '{field_label}' failed: {e}");
                Vec::new()
            }
        }
    }

    /// Content of the closest template, or `FALLBACK_TEMPLATE`.
    pub async fn template_content(&self, field_label: &str) -> String {
        match self.templates_for(field_label, 1).await.into_iter().next() {
            Some(document) => {
                info!(
                    "Using '{}' template for job field '{}'",
                    document.field_label, field_label
                );
                document.content
            }
            None => {
                warn!("No template retrieved for '{field_label}', using generic fallback");
                FALLBACK_TEMPLATE.to_string()
            }
        }
    }
}

/// Loads the persisted index, or builds one from the seed corpus and tries to
/// persist it. Only a failed build is an error.
async fn load_or_build(
    dir: &Path,
    embedder: Arc<dyn Embedder>,
) -> Result<TemplateIndex, TemplateError> {
    match TemplateIndex::load(dir, embedder.clone()).await {
        Ok(index) => {
            info!(
                "Loaded template index from {} ({} documents, built {})",
                dir.display(),
                index.len(),
                index.built_at().to_rfc3339()
            );
            return Ok(index);
        }
        Err(e) => info!(
            "No usable template index at {} ({e}); building from seed corpus",
            dir.display()
        ),
    }

    let index = TemplateIndex::build(seed_corpus(), embedder).await?;
    info!("Built template index with {} documents", index.len());

    if let Err(e) = index.save(dir).await {
        warn!("Could not save template index to {}: {e}", dir.display());
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::templates::embedder::{EmbeddingError, HashingEmbedder};

    /// Counts batch calls so tests can observe how many times the index was built.
    struct CountingEmbedder {
        inner: HashingEmbedder,
        builds: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        fn id(&self) -> String {
            self.inner.id()
        }
        fn dimension(&self) -> usize {
            self.inner.dimension()
        }
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.inner.embed(text).await
        }
        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.inner.embed_batch(texts).await
        }
    }

    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        fn id(&self) -> String {
            "broken".to_string()
        }
        fn dimension(&self) -> usize {
            8
        }
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_template_query_format() {
        assert_eq!(template_query("Finance"), "Resume template for Finance");
    }

    #[tokio::test]
    async fn test_first_use_builds_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let retriever =
            TemplateRetriever::new(dir.path().join("idx"), Arc::new(HashingEmbedder::default()));

        let content = retriever.template_content("Finance").await;
        assert!(content.contains("CORE COMPETENCIES"));
        assert!(dir.path().join("idx").join("index.json").exists());
    }

    #[tokio::test]
    async fn test_second_process_loads_persisted_index() {
        let dir = tempfile::tempdir().unwrap();
        let first =
            TemplateRetriever::new(dir.path().to_path_buf(), Arc::new(HashingEmbedder::default()));
        let built_at = first.index().await.unwrap().built_at();

        let counting = Arc::new(CountingEmbedder {
            inner: HashingEmbedder::default(),
            builds: AtomicUsize::new(0),
        });
        let second = TemplateRetriever::new(dir.path().to_path_buf(), counting.clone());
        assert_eq!(second.index().await.unwrap().built_at(), built_at);
        assert_eq!(counting.builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_builds_once() {
        let dir = tempfile::tempdir().unwrap();
        let counting = Arc::new(CountingEmbedder {
            inner: HashingEmbedder::default(),
            builds: AtomicUsize::new(0),
        });
        let retriever = Arc::new(TemplateRetriever::new(
            dir.path().to_path_buf(),
            counting.clone(),
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let r = retriever.clone();
            handles.push(tokio::spawn(async move { r.templates_for("Marketing", 1).await }));
        }
        for handle in handles {
            let hits = handle.await.unwrap();
            assert_eq!(hits[0].field_label, "Marketing");
        }
        assert_eq!(counting.builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the index directory should be makes saving impossible.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let retriever =
            TemplateRetriever::new(blocker.join("idx"), Arc::new(HashingEmbedder::default()));

        let hits = retriever.templates_for("Data Science", 1).await;
        assert_eq!(hits[0].field_label, "Data Science");
    }

    #[tokio::test]
    async fn test_broken_embedder_falls_back_to_generic_template() {
        let dir = tempfile::tempdir().unwrap();
        let retriever = TemplateRetriever::new(dir.path().to_path_buf(), Arc::new(BrokenEmbedder));
        assert!(retriever.templates_for("Finance", 1).await.is_empty());
        assert_eq!(retriever.template_content("Finance").await, FALLBACK_TEMPLATE);
    }

    #[tokio::test]
    async fn test_k_zero_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let retriever =
            TemplateRetriever::new(dir.path().to_path_buf(), Arc::new(HashingEmbedder::default()));
        assert!(retriever.templates_for("Finance", 0).await.is_empty());
    }
}
