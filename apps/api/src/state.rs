use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::templates::TemplateRetriever;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text generator. `LlmClient` in production, fakes in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Lazily loaded template index, shared read-only across requests.
    pub templates: Arc<TemplateRetriever>,
}
