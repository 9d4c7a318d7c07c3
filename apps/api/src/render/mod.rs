// Document renderer: ParsedResume → paginated US Letter PDF.
// Layout is pure CPU work; async callers must run it inside tokio::task::spawn_blocking.

pub mod artifact;
pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod style;

pub use artifact::{render_artifact, PdfArtifact};
pub use pdf::RenderError;

use tracing::info;

use crate::resume::ParsedResume;

/// Renders a parsed resume to PDF bytes.
pub fn render(parsed: &ParsedResume) -> Result<Vec<u8>, RenderError> {
    let pages = layout::layout_resume(parsed);
    let bytes = pdf::write_pdf(&pages)?;
    info!("Rendered resume PDF: {} pages, {} bytes", pages.len(), bytes.len());
    Ok(bytes)
}
