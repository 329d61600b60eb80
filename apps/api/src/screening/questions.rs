//! Interview questions: three CV-grounded questions for invited
//! candidates, a fixed sentinel for rejected ones.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::prompts::{HR_EXPERT_PERSONA, JSON_ONLY_RULES};
use crate::screening::completion::{decode_stage_output, CompletionClient, StageSpec};
use crate::screening::prompts::QUESTIONS_INSTRUCTION;
use crate::screening::scoring::ScreeningOutcome;
use crate::screening::transcript::Transcript;

const STAGE: &str = "question_composition";

/// Marks a run that produced no interview questions.
pub const NO_QUESTIONS_SENTINEL: &str = "-";

/// Structured output of the question composition stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: String,
}

fn spec() -> StageSpec {
    StageSpec {
        name: STAGE,
        system: format!("{HR_EXPERT_PERSONA}\n\n{JSON_ONLY_RULES}"),
        instruction: QUESTIONS_INSTRUCTION.to_string(),
        response_schema: json!({
            "type": "object",
            "properties": {
                "questions": {"type": "string"},
            },
            "required": ["questions"],
        }),
    }
}

/// Runs the question composition stage for the decided outcome.
///
/// A rejected candidate gets the sentinel without a model call, but the
/// sentinel still lands on the transcript so every finished run has the
/// same shape: résumé turn plus one model turn per stage.
pub async fn run_question_composition(
    completion: &dyn CompletionClient,
    transcript: &mut Transcript,
    outcome: ScreeningOutcome,
) -> Result<String, AppError> {
    match outcome {
        ScreeningOutcome::Reject => {
            transcript.push_model(&json!({ "questions": NO_QUESTIONS_SENTINEL }));
            Ok(NO_QUESTIONS_SENTINEL.to_string())
        }
        ScreeningOutcome::Invite => {
            let spec = spec();
            let value = completion.complete(transcript, &spec).await?;
            let set: QuestionSet = decode_stage_output(STAGE, &value)?;
            transcript.push_model(&value);
            Ok(set.questions)
        }
    }
}
