// Template retrieval: a fixed corpus of exemplar resumes behind a small
// similarity index, queried once per request by job field.

pub mod corpus;
pub mod embedder;
pub mod index;
pub mod retriever;

pub use corpus::TemplateDocument;
pub use embedder::{Embedder, HashingEmbedder, OpenAiEmbedder};
pub use retriever::TemplateRetriever;
