/// LLM Client — the single point of entry for all Gemini API calls in Sift.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module (screening stages use
/// it via the `CompletionClient` trait).
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls in Sift.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Content blocked by provider: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One part of a conversation turn. Text-only: Sift never sends media.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// One conversation turn sent to the model. `role` is "user" or "model".
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Content {
            role: "user",
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Content {
            role: "model",
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Instruction<'a>,
    contents: &'a [Content],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: [InstructionPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InstructionPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a Value,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate. Long responses can be
    /// split across parts, so a first-part-only read would truncate them.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let joined: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all screening stages in Sift.
/// Wraps the Gemini generateContent API with retry logic and JSON-mode output.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Requests JSON-mode output constrained to `response_schema`.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn generate(
        &self,
        system: &str,
        contents: &[Content],
        response_schema: &Value,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");
        let request_body = GenerateContentRequest {
            system_instruction: Instruction {
                parts: [InstructionPart { text: system }],
            },
            contents,
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse error message
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: GenerateContentResponse = response.json().await?;

            if let Some(reason) = llm_response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                return Err(LlmError::Blocked(reason.to_string()));
            }
            if let Some(reason) = llm_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .filter(|r| *r == "SAFETY" || *r == "PROHIBITED_CONTENT")
            {
                return Err(LlmError::Blocked(reason.to_string()));
            }

            if let Some(usage) = &llm_response.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Convenience method that calls the model and parses the text response
    /// as JSON. JSON mode makes fenced output rare, but stray fences are
    /// stripped anyway before parsing.
    pub async fn generate_json(
        &self,
        system: &str,
        contents: &[Content],
        response_schema: &Value,
    ) -> Result<Value, LlmError> {
        let response = self.generate(system, contents, response_schema).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
