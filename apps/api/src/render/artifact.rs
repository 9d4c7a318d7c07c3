use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::render::pdf::RenderError;
use crate::render::render;
use crate::resume::ParsedResume;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A rendered resume ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct PdfArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Renders the resume through a temporary file in the system temp directory and
/// reads it back.
pub fn render_artifact(parsed: &ParsedResume, stem: &str) -> Result<PdfArtifact, RenderError> {
    render_artifact_in(&std::env::temp_dir(), parsed, stem)
}

/// Like [`render_artifact`], with the temporary file created inside `dir`.
///
/// The temp file is removed when it goes out of scope, on success and on every
/// error path, so a partially written PDF is never left behind.
pub fn render_artifact_in(
    dir: &Path,
    parsed: &ParsedResume,
    stem: &str,
) -> Result<PdfArtifact, RenderError> {
    let pdf = render(parsed)?;
    let buf = spool_through_temp(dir, &pdf, read_back)?;

    let filename = download_filename(stem);
    info!("PDF artifact ready: {} ({} bytes)", filename, buf.len());

    Ok(PdfArtifact {
        filename,
        content_type: PDF_CONTENT_TYPE,
        bytes: Bytes::from(buf),
    })
}

/// Writes `pdf` to a `NamedTempFile` in `dir` and hands the file to `read`.
fn spool_through_temp<F>(dir: &Path, pdf: &[u8], read: F) -> io::Result<Vec<u8>>
where
    F: FnOnce(&mut File, usize) -> io::Result<Vec<u8>>,
{
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(pdf)?;
    file.flush()?;
    read(file.as_file_mut(), pdf.len())
}

fn read_back(handle: &mut File, len: usize) -> io::Result<Vec<u8>> {
    handle.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::with_capacity(len);
    handle.read_to_end(&mut buf)?;
    Ok(buf)
}

/// `"Jane Doe"` → `"Jane_Doe_resume.pdf"`.
///
/// Whitespace runs become a single underscore; characters that are unsafe in a
/// `Content-Disposition` filename are dropped. A blank stem yields `resume.pdf`.
pub fn download_filename(stem: &str) -> String {
    let cleaned: String = stem
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{cleaned}_resume.pdf")
    }
}
