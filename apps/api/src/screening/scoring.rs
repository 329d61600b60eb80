//! Score assignment: the 0 to 10 fit score and the branch it decides.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::prompts::{HR_EXPERT_PERSONA, JSON_ONLY_RULES};
use crate::screening::completion::{decode_stage_output, CompletionClient, StageSpec};
use crate::screening::prompts::SCORE_INSTRUCTION;
use crate::screening::transcript::Transcript;

const STAGE: &str = "score_assignment";

/// Scores at or above this invite the candidate to interview; everything
/// below rejects.
pub const INTERVIEW_THRESHOLD: u8 = 7;

const MAX_SCORE: u8 = 10;

/// Structured output of the score assignment stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u8,
}

/// The branch the remaining stages follow. Decided once, in code, from
/// the score; no stage re-derives it from the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningOutcome {
    Reject,
    Invite,
}

impl ScreeningOutcome {
    pub fn from_score(score: u8) -> Self {
        if score < INTERVIEW_THRESHOLD {
            ScreeningOutcome::Reject
        } else {
            ScreeningOutcome::Invite
        }
    }
}

fn spec() -> StageSpec {
    StageSpec {
        name: STAGE,
        system: format!("{HR_EXPERT_PERSONA}\n\n{JSON_ONLY_RULES}"),
        instruction: SCORE_INSTRUCTION.to_string(),
        response_schema: json!({
            "type": "object",
            "properties": {
                "score": {"type": "integer"},
            },
            "required": ["score"],
        }),
    }
}

/// A score outside 0 to 10 means the model ignored its instruction, which
/// is a schema failure, not a low or high score.
fn validate(card: ScoreCard) -> Result<ScoreCard, AppError> {
    if card.score > MAX_SCORE {
        return Err(AppError::schema(
            STAGE,
            format!("score {} is outside the 0 to 10 range", card.score),
        ));
    }
    Ok(card)
}

/// Runs the score assignment stage. Only a validated score lands on the
/// transcript.
pub async fn run_score_assignment(
    completion: &dyn CompletionClient,
    transcript: &mut Transcript,
) -> Result<ScoreCard, AppError> {
    let spec = spec();
    let value = completion.complete(transcript, &spec).await?;
    let card = validate(decode_stage_output(STAGE, &value)?)?;
    transcript.push_model(&value);
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::completion::ScriptedCompletion;

    #[test]
    fn test_outcome_below_threshold_rejects() {
        assert_eq!(ScreeningOutcome::from_score(0), ScreeningOutcome::Reject);
        assert_eq!(ScreeningOutcome::from_score(6), ScreeningOutcome::Reject);
    }

    #[test]
    fn test_outcome_at_threshold_invites() {
        assert_eq!(ScreeningOutcome::from_score(7), ScreeningOutcome::Invite);
        assert_eq!(ScreeningOutcome::from_score(10), ScreeningOutcome::Invite);
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let err = validate(ScoreCard { score: 11 }).unwrap_err();
        assert!(matches!(err, AppError::SchemaConformance { stage, .. } if stage == STAGE));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(validate(ScoreCard { score: 0 }).is_ok());
        assert!(validate(ScoreCard { score: 10 }).is_ok());
    }

    #[tokio::test]
    async fn test_run_decodes_and_appends_score() {
        let completion = ScriptedCompletion::new(vec![Ok(json!({"score": 8}))]);
        let mut transcript = Transcript::seed("resume");

        let card = run_score_assignment(&completion, &mut transcript)
            .await
            .unwrap();

        assert_eq!(card.score, 8);
        assert_eq!(transcript.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_run_rejects_negative_score_as_schema_failure() {
        let completion = ScriptedCompletion::new(vec![Ok(json!({"score": -2}))]);
        let mut transcript = Transcript::seed("resume");

        let err = run_score_assignment(&completion, &mut transcript)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SchemaConformance { .. }));
        assert_eq!(transcript.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_run_rejects_out_of_range_score_without_appending() {
        let completion = ScriptedCompletion::new(vec![Ok(json!({"score": 42}))]);
        let mut transcript = Transcript::seed("resume");

        let err = run_score_assignment(&completion, &mut transcript)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::SchemaConformance { .. }));
        assert_eq!(transcript.entries().len(), 1);
    }
}
