//! Orchestrates a full screening run: fetch, extract, four stages in
//! order, then release of the staged document on every exit path.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::AppError;
use crate::intake::extract::first_page_text;
use crate::intake::store::{DocumentStore, StoreError};
use crate::screening::completion::CompletionClient;
use crate::screening::email::run_email_composition;
use crate::screening::match_analysis::run_match_analysis;
use crate::screening::questions::run_question_composition;
use crate::screening::scoring::{run_score_assignment, ScreeningOutcome};
use crate::screening::transcript::Transcript;

/// Everything a finished screening run reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub minimal_requirements_analysis: String,
    pub preferred_requirements_analysis: String,
    pub strengths: String,
    pub potential_gaps: String,
    pub score: u8,
    pub email: String,
    pub questions: String,
}

/// Screens one staged document and always releases it afterwards.
///
/// The release bracket wraps the whole fallible pipeline, so the document
/// is deleted on success, on extraction failure, and on any mid-stage
/// abort alike. A failed delete is logged and never overturns the run's
/// result.
pub async fn screen_document(
    store: &dyn DocumentStore,
    completion: &dyn CompletionClient,
    document_key: &str,
) -> Result<ScreeningReport, AppError> {
    let result = run_pipeline(store, completion, document_key).await;
    if let Err(e) = store.delete(document_key).await {
        error!("Failed to release staged document '{document_key}': {e}");
    }
    result
}

async fn run_pipeline(
    store: &dyn DocumentStore,
    completion: &dyn CompletionClient,
    document_key: &str,
) -> Result<ScreeningReport, AppError> {
    let bytes = store.fetch(document_key).await.map_err(|e| match e {
        StoreError::NotFound(key) => {
            AppError::Extraction(format!("no staged document at '{key}'"))
        }
        StoreError::Backend(detail) => AppError::Storage(detail),
    })?;
    let resume_text = first_page_text(&bytes)?;
    let mut transcript = Transcript::seed(&resume_text);

    let analysis = run_match_analysis(completion, &mut transcript).await?;
    let card = run_score_assignment(completion, &mut transcript).await?;
    let outcome = ScreeningOutcome::from_score(card.score);
    info!(
        "Screening '{document_key}' scored {} -> {outcome:?}",
        card.score
    );

    let email = run_email_composition(
        completion,
        &mut transcript,
        outcome,
        &analysis.candidate_name,
    )
    .await?;
    let questions = run_question_composition(completion, &mut transcript, outcome).await?;

    Ok(ScreeningReport {
        minimal_requirements_analysis: analysis.minimal_requirements_analysis,
        preferred_requirements_analysis: analysis.preferred_requirements_analysis,
        strengths: analysis.strengths,
        potential_gaps: analysis.potential_gaps,
        score: card.score,
        email,
        questions,
    })
}
