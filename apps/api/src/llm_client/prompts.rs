// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Instruction appended to prompts whose output is parsed as plain text.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with plain text only. \
    Do NOT use markdown code fences, tables, or HTML. \
    Do NOT add commentary before or after the requested content.";

/// Instruction that keeps generated content factual.
pub const FACTUAL_INSTRUCTION: &str = "\
    Use ONLY the facts supplied by the user. \
    You may rephrase, reorder, and tighten them, but never invent employers, \
    dates, degrees, certifications, or metrics that were not provided.";
