//! Match analysis: measures the résumé against the job requirements.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::llm_client::prompts::{HR_EXPERT_PERSONA, JSON_ONLY_RULES};
use crate::screening::completion::{decode_stage_output, CompletionClient, StageSpec};
use crate::screening::prompts::{JOB_REQUIREMENTS, MATCH_ANALYSIS_INSTRUCTION};
use crate::screening::transcript::Transcript;

const STAGE: &str = "match_analysis";

/// Structured output of the match analysis stage. `candidate_name` feeds
/// the email finalization later in the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub minimal_requirements_analysis: String,
    pub preferred_requirements_analysis: String,
    pub strengths: String,
    pub potential_gaps: String,
    pub candidate_name: String,
}

fn spec() -> StageSpec {
    StageSpec {
        name: STAGE,
        system: format!("{HR_EXPERT_PERSONA}\n\n{JOB_REQUIREMENTS}\n\n{JSON_ONLY_RULES}"),
        instruction: MATCH_ANALYSIS_INSTRUCTION.to_string(),
        response_schema: json!({
            "type": "object",
            "properties": {
                "minimal_requirements_analysis": {"type": "string"},
                "preferred_requirements_analysis": {"type": "string"},
                "strengths": {"type": "string"},
                "potential_gaps": {"type": "string"},
                "candidate_name": {"type": "string"},
            },
            "required": [
                "minimal_requirements_analysis",
                "preferred_requirements_analysis",
                "strengths",
                "potential_gaps",
                "candidate_name",
            ],
        }),
    }
}

/// Runs the match analysis stage. On success the raw output becomes a
/// model turn on the transcript, so later stages can read it.
pub async fn run_match_analysis(
    completion: &dyn CompletionClient,
    transcript: &mut Transcript,
) -> Result<MatchReport, AppError> {
    let spec = spec();
    let value = completion.complete(transcript, &spec).await?;
    let report: MatchReport = decode_stage_output(STAGE, &value)?;
    transcript.push_model(&value);
    Ok(report)
}
