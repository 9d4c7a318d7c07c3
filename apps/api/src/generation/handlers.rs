//! Axum route handlers for the Resume API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::form::ResumeForm;
use crate::generation::generator::generate_resume_content;
use crate::render::{render_artifact, PdfArtifact};
use crate::resume::{parse, ParsedResume};
use crate::state::AppState;
use crate::templates::retriever::template_query;
use crate::templates::TemplateDocument;

const MAX_TEMPLATE_RESULTS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume_text: String,
    pub parsed_resume: ParsedResume,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume_text: String,
    /// Download name stem; defaults to the parsed name.
    pub file_stem: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplatesQuery {
    pub field: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub query: String,
    pub templates: Vec<TemplateDocument>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Generates resume text for the form and returns it with its parsed structure.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(form): Json<ResumeForm>,
) -> Result<Json<GenerateResponse>, AppError> {
    form.validate()?;
    let resume_text = generate(&state, &form).await?;
    let parsed_resume = parse(&resume_text);
    Ok(Json(GenerateResponse {
        resume_text,
        parsed_resume,
    }))
}

/// POST /api/v1/resumes/pdf
///
/// Generate → parse → render in one call. Responds with the PDF as a download.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(form): Json<ResumeForm>,
) -> Result<Response, AppError> {
    form.validate()?;
    let resume_text = generate(&state, &form).await?;
    let artifact = render_download(parse(&resume_text), form.name.clone()).await?;
    Ok(pdf_response(artifact))
}

/// POST /api/v1/resumes/render
///
/// Renders already generated (possibly user-edited) resume text without calling the LLM.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Result<Response, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    let parsed = parse(&request.resume_text);
    let stem = request
        .file_stem
        .filter(|s| !s.trim().is_empty())
        .or_else(|| parsed.name.clone())
        .unwrap_or_default();
    let artifact = render_download(parsed, stem).await?;
    Ok(pdf_response(artifact))
}

/// POST /api/v1/resumes/parse
///
/// Returns the structure the renderer would see. Never fails on content.
pub async fn handle_parse(Json(request): Json<ParseRequest>) -> Json<ParsedResume> {
    Json(parse(&request.resume_text))
}

/// GET /api/v1/templates?field=<label>&k=<n>
///
/// Nearest exemplar templates for a job field (k defaults to 1).
pub async fn handle_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> Result<Json<TemplatesResponse>, AppError> {
    let field = query.field.trim();
    if field.is_empty() {
        return Err(AppError::Validation("field cannot be empty".to_string()));
    }
    let k = query.k.unwrap_or(1).min(MAX_TEMPLATE_RESULTS);
    let templates = state.templates.templates_for(field, k).await;
    Ok(Json(TemplatesResponse {
        query: template_query(field),
        templates,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

async fn generate(state: &AppState, form: &ResumeForm) -> Result<String, AppError> {
    generate_resume_content(
        &state.templates,
        state.llm.as_ref(),
        form,
        state.config.generation_timeout,
    )
    .await
}

/// Rendering is CPU-bound; run it off the async executor.
async fn render_download(parsed: ParsedResume, stem: String) -> Result<PdfArtifact, AppError> {
    tokio::task::spawn_blocking(move || render_artifact(&parsed, &stem))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?
        .map_err(|e| AppError::Render(e.to_string()))
}

fn pdf_response(artifact: PdfArtifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// `attachment` disposition with an ASCII `filename` and, when the name is not
/// plain ASCII, an RFC 5987 `filename*` carrying the UTF-8 original.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
