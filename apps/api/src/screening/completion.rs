//! Stage execution seam.
//!
//! Every screening stage is described by a [`StageSpec`] and executed
//! through the [`CompletionClient`] trait, so the pipeline never touches
//! the Gemini client directly and tests can script stage outputs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::{Content, GeminiClient, Part};
use crate::screening::transcript::{Role, Transcript};

/// Everything the model needs to run one screening stage: a name for
/// error reporting, a system prompt, the user-facing instruction, and
/// the JSON schema the response must conform to.
pub struct StageSpec {
    pub name: &'static str,
    pub system: String,
    pub instruction: String,
    pub response_schema: Value,
}

/// Runs one stage against a completion backend. The returned value has
/// already passed the schema's required-field check.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, transcript: &Transcript, spec: &StageSpec)
        -> Result<Value, AppError>;
}

/// Production backend: Gemini in JSON mode.
pub struct GeminiCompletion {
    client: GeminiClient,
}

impl GeminiCompletion {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionClient for GeminiCompletion {
    async fn complete(
        &self,
        transcript: &Transcript,
        spec: &StageSpec,
    ) -> Result<Value, AppError> {
        let contents = build_contents(transcript, &spec.instruction);
        let value = self
            .client
            .generate_json(&spec.system, &contents, &spec.response_schema)
            .await?;
        check_required_fields(spec, &value)?;
        Ok(value)
    }
}

/// Folds the transcript into Gemini `contents`. The API wants strictly
/// alternating roles, so consecutive turns with the same role collapse
/// into one content with multiple parts, and the stage instruction lands
/// as (part of) the final user turn.
fn build_contents(transcript: &Transcript, instruction: &str) -> Vec<Content> {
    let mut contents: Vec<Content> = Vec::new();
    for entry in transcript.entries() {
        let role = match entry.role {
            Role::User => "user",
            Role::Model => "model",
        };
        match contents.last_mut() {
            Some(last) if last.role == role => last.parts.push(Part {
                text: entry.content.clone(),
            }),
            _ => contents.push(match entry.role {
                Role::User => Content::user(entry.content.clone()),
                Role::Model => Content::model(entry.content.clone()),
            }),
        }
    }
    match contents.last_mut() {
        Some(last) if last.role == "user" => last.parts.push(Part {
            text: instruction.to_string(),
        }),
        _ => contents.push(Content::user(instruction)),
    }
    contents
}

/// JSON mode is constrained by the schema server-side, but a missing
/// field still means the rest of the pipeline cannot proceed, so it is
/// surfaced as a schema-conformance failure naming the stage.
fn check_required_fields(spec: &StageSpec, value: &Value) -> Result<(), AppError> {
    let Some(required) = spec.response_schema.get("required").and_then(Value::as_array) else {
        return Ok(());
    };
    for field in required.iter().filter_map(Value::as_str) {
        if value.get(field).is_none() {
            return Err(AppError::schema(
                spec.name,
                format!("response is missing required field '{field}'"),
            ));
        }
    }
    Ok(())
}

/// Decodes a stage's raw JSON output into its typed form, reporting
/// mismatches as schema-conformance failures for that stage.
pub fn decode_stage_output<T: DeserializeOwned>(
    stage: &'static str,
    value: &Value,
) -> Result<T, AppError> {
    serde_json::from_value(value.clone()).map_err(|e| AppError::schema(stage, e.to_string()))
}

/// Test backend that replays a fixed script of stage outputs.
#[cfg(test)]
pub(crate) struct ScriptedCompletion {
    script: std::sync::Mutex<std::collections::VecDeque<Result<Value, AppError>>>,
}

#[cfg(test)]
impl ScriptedCompletion {
    pub(crate) fn new(outputs: Vec<Result<Value, AppError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(outputs.into()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        _transcript: &Transcript,
        spec: &StageSpec,
    ) -> Result<Value, AppError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted output left for stage '{}'", spec.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec_with_schema(schema: Value) -> StageSpec {
        StageSpec {
            name: "test_stage",
            system: "system".to_string(),
            instruction: "do the thing".to_string(),
            response_schema: schema,
        }
    }

    #[test]
    fn test_seeded_transcript_becomes_single_user_turn() {
        let transcript = Transcript::seed("resume text");
        let contents = build_contents(&transcript, "analyze this");

        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[0].parts.len(), 2);
        assert_eq!(contents[0].parts[0].text, "resume text");
        assert_eq!(contents[0].parts[1].text, "analyze this");
    }

    #[test]
    fn test_consecutive_model_turns_collapse() {
        let mut transcript = Transcript::seed("resume");
        transcript.push_model(&json!({"a": 1}));
        transcript.push_model(&json!({"b": 2}));
        let contents = build_contents(&transcript, "next stage");

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].parts.len(), 2);
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[2].parts[0].text, "next stage");
    }

    #[test]
    fn test_required_field_check_passes_when_present() {
        let spec = spec_with_schema(json!({
            "type": "object",
            "properties": {"score": {"type": "integer"}},
            "required": ["score"],
        }));
        assert!(check_required_fields(&spec, &json!({"score": 7})).is_ok());
    }

    #[test]
    fn test_required_field_check_names_missing_field() {
        let spec = spec_with_schema(json!({
            "type": "object",
            "properties": {"score": {"type": "integer"}},
            "required": ["score"],
        }));
        let err = check_required_fields(&spec, &json!({"other": 1})).unwrap_err();
        match err {
            AppError::SchemaConformance { stage, detail } => {
                assert_eq!(stage, "test_stage");
                assert!(detail.contains("score"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_stage_output_reports_stage() {
        #[derive(Debug, serde::Deserialize)]
        struct Out {
            #[allow(dead_code)]
            score: u8,
        }
        let err = decode_stage_output::<Out>("score_stage", &json!({"score": "nine"})).unwrap_err();
        assert!(matches!(err, AppError::SchemaConformance { stage, .. } if stage == "score_stage"));
    }
}
