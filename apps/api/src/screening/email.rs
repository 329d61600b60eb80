//! Email composition: drafts the outcome email and finalizes it before
//! it ever lands on the transcript.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::prompts::{HR_EXPERT_PERSONA, JSON_ONLY_RULES};
use crate::screening::completion::{decode_stage_output, CompletionClient, StageSpec};
use crate::screening::prompts::{INVITATION_EMAIL_INSTRUCTION, REJECTION_EMAIL_INSTRUCTION};
use crate::screening::schedule::{finalize_invitation, finalize_rejection, InterviewSlot};
use crate::screening::scoring::ScreeningOutcome;
use crate::screening::transcript::Transcript;

const STAGE: &str = "email_composition";

/// Raw model output for the email stage, before finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDraft {
    pub email: String,
}

fn spec(outcome: ScreeningOutcome) -> StageSpec {
    let instruction = match outcome {
        ScreeningOutcome::Reject => REJECTION_EMAIL_INSTRUCTION,
        ScreeningOutcome::Invite => INVITATION_EMAIL_INSTRUCTION,
    };
    StageSpec {
        name: STAGE,
        system: format!("{HR_EXPERT_PERSONA}\n\n{JSON_ONLY_RULES}"),
        instruction: instruction.to_string(),
        response_schema: json!({
            "type": "object",
            "properties": {
                "email": {"type": "string"},
            },
            "required": ["email"],
        }),
    }
}

/// Runs the email composition stage for the decided outcome.
///
/// The draft is finalized first and appended second, so the transcript
/// only ever carries the email a candidate could actually receive. The
/// question stage downstream reads it from there.
pub async fn run_email_composition(
    completion: &dyn CompletionClient,
    transcript: &mut Transcript,
    outcome: ScreeningOutcome,
    candidate_name: &str,
) -> Result<String, AppError> {
    let spec = spec(outcome);
    let value = completion.complete(transcript, &spec).await?;
    let draft: EmailDraft = decode_stage_output(STAGE, &value)?;

    // ThreadRng is created only after the model call completes; it must
    // never be held across an await point.
    let email = match outcome {
        ScreeningOutcome::Reject => finalize_rejection(&draft.email, candidate_name),
        ScreeningOutcome::Invite => {
            let mut rng = rand::thread_rng();
            let slot = InterviewSlot::draw(Local::now().date_naive(), &mut rng);
            finalize_invitation(&draft.email, candidate_name, &slot)
        }
    };

    transcript.push_model(&json!({ "email": &email }));
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::completion::ScriptedCompletion;
    use chrono::Duration;

    const INVITATION_DRAFT: &str = "Hello, [CANDIDATE_NAME]\n\nCongratulations.\n\n\
        Date : [INTERVIEW_DATE]\nTime : [INTERVIEW_TIME]\n\
        Google Meet interview link : https://bit.ly/sift-interview\n\n\
        Thanks,\nThe Recruiting Team.";

    #[tokio::test]
    async fn test_invitation_is_finalized_before_append() {
        let completion =
            ScriptedCompletion::new(vec![Ok(json!({"email": INVITATION_DRAFT}))]);
        let mut transcript = Transcript::seed("resume");

        let before = Local::now().date_naive();
        let email = run_email_composition(
            &completion,
            &mut transcript,
            ScreeningOutcome::Invite,
            "Jane Doe",
        )
        .await
        .unwrap();
        let after = Local::now().date_naive();

        assert!(email.contains("Hello, Jane Doe"));
        assert!(!email.contains("[CANDIDATE_NAME]"));
        assert!(!email.contains("[INTERVIEW_DATE]"));
        assert!(!email.contains("[INTERVIEW_TIME]"));

        // The date is three days after "today"; tolerate a run that
        // crosses midnight between the two clock reads.
        let candidates = [
            (before + Duration::days(3)).format("%d-%m-%Y").to_string(),
            (after + Duration::days(3)).format("%d-%m-%Y").to_string(),
        ];
        assert!(
            candidates.iter().any(|d| email.contains(d.as_str())),
            "email was: {email}"
        );

        // Transcript carries the finalized body, not the draft.
        assert_eq!(transcript.entries().len(), 2);
        let appended: serde_json::Value =
            serde_json::from_str(&transcript.entries()[1].content).unwrap();
        assert_eq!(appended["email"].as_str().unwrap(), email);
    }

    #[tokio::test]
    async fn test_rejection_substitutes_name_only() {
        let draft = "Hello, [CANDIDATE_NAME]\n\nUnfortunately.\n\nThanks,\nThe Recruiting Team.";
        let completion = ScriptedCompletion::new(vec![Ok(json!({"email": draft}))]);
        let mut transcript = Transcript::seed("resume");

        let email = run_email_composition(
            &completion,
            &mut transcript,
            ScreeningOutcome::Reject,
            "John Smith",
        )
        .await
        .unwrap();

        assert!(email.contains("Hello, John Smith"));
        assert!(!email.contains("[CANDIDATE_NAME]"));
        assert!(!email.contains("Date :"));
    }

    #[tokio::test]
    async fn test_draft_missing_time_token_keeps_date_token() {
        let draft = "Hello, [CANDIDATE_NAME]\nDate : [INTERVIEW_DATE]\nThanks";
        let completion = ScriptedCompletion::new(vec![Ok(json!({"email": draft}))]);
        let mut transcript = Transcript::seed("resume");

        let email = run_email_composition(
            &completion,
            &mut transcript,
            ScreeningOutcome::Invite,
            "Jane Doe",
        )
        .await
        .unwrap();

        assert!(email.contains("[INTERVIEW_DATE]"));
        assert!(email.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_non_string_email_is_a_schema_failure() {
        let completion = ScriptedCompletion::new(vec![Ok(json!({"email": ["not", "a", "string"]}))]);
        let mut transcript = Transcript::seed("resume");

        let err = run_email_composition(
            &completion,
            &mut transcript,
            ScreeningOutcome::Reject,
            "Jane Doe",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::SchemaConformance { stage, .. } if stage == STAGE));
        assert_eq!(transcript.entries().len(), 1);
    }
}
