//! Resume generation: orchestrates retrieval and the language-model call.
//!
//! Flow: job field → nearest template (or generic fallback) → prompt →
//!       TextGenerator under a timeout → fence-stripped plain text.
//!
//! Retrieval problems never fail a request; a failed or timed-out generation does,
//! and no partial text is returned in that case.

use std::time::Duration;

use tracing::info;

use crate::errors::AppError;
use crate::generation::form::ResumeForm;
use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::llm_client::prompts::{FACTUAL_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{strip_code_fences, TextGenerator};
use crate::templates::TemplateRetriever;

/// Generates resume text for a validated form.
pub async fn generate_resume_content(
    templates: &TemplateRetriever,
    llm: &dyn TextGenerator,
    form: &ResumeForm,
    timeout: Duration,
) -> Result<String, AppError> {
    let job_field = form.job_field.label();
    let context = templates.template_content(job_field).await;
    let prompt = build_generation_prompt(&form.user_details(), job_field, &context);

    let generated = tokio::time::timeout(timeout, llm.generate(&prompt, RESUME_SYSTEM))
        .await
        .map_err(|_| {
            AppError::Generation(format!(
                "LLM call timed out after {}s",
                timeout.as_secs()
            ))
        })?
        .map_err(|e| AppError::Generation(format!("LLM call failed: {e}")))?;

    let text = strip_code_fences(&generated);
    if text.is_empty() {
        return Err(AppError::Generation("LLM returned an empty resume".to_string()));
    }

    info!(
        "Generated resume content for {}: prompt {} chars, resume {} chars",
        job_field,
        prompt.len(),
        text.len()
    );
    Ok(text.to_string())
}

pub(crate) fn build_generation_prompt(user_details: &str, job_field: &str, context: &str) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
        .replace("{job_field}", job_field)
        .replace("{context}", context)
        .replace("{user_details}", user_details)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
