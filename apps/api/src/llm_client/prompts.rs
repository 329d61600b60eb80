// Shared prompt constants and prompt-building utilities.
// Each screening stage defines its own prompts in screening/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// Persona fragment shared by every screening stage system prompt.
pub const HR_EXPERT_PERSONA: &str = "You are a virtual human resources expert \
    assisting with the screening step of a recruitment process.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
