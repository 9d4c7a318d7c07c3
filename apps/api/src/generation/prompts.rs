// LLM prompt constants for resume generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the resume writer.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer producing concise, \
    ATS-friendly resumes. Write in a confident, professional tone with strong action verbs \
    and quantified impact where the user's facts allow it.";

/// Generation prompt. Replace `{factual_instruction}`, `{plain_text_instruction}`,
/// `{user_details}`, `{job_field}` and `{context}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"{factual_instruction}

Write a professional resume for a candidate targeting the {job_field} field.

CANDIDATE DETAILS:
{user_details}

REFERENCE TEMPLATE (follow its structure and tone, not its facts):
{context}

FORMAT RULES:
- First line: the candidate's full name.
- Second line: contact details separated by " | ".
- Then these section headers, each on its own line, in this order, omitting any with no content:
  SUMMARY, EXPERIENCE, EDUCATION, SKILLS, CERTIFICATIONS, PROJECTS
- EXPERIENCE: one line per job as "Role | Company | Dates", followed by bullet lines starting with "• ".
- SKILLS: one line per category as "Category: item, item, item".
- Other sections: short lines or "• " bullets.

{plain_text_instruction}"#;
