//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::orchestrator::{screen_document, ScreeningReport};
use crate::state::AppState;

const PDF_MAGIC: &[u8] = b"%PDF-";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub document_key: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_key: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
///
/// Stages a candidate PDF for a later screening run. Takes the first file
/// field of a multipart form and returns the generated document key.
pub async fn handle_upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::Validation("request carries no file field".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("could not read uploaded file: {e}")))?;

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "uploaded document is not a PDF".to_string(),
        ));
    }

    let document_key = format!("cv/{}.pdf", Uuid::new_v4());
    state
        .store
        .upload(&document_key, bytes)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok(Json(UploadResponse { document_key }))
}

/// POST /api/v1/screenings
///
/// Runs the full screening pipeline against a staged document and returns
/// the decision report. The staged document is released afterwards whether
/// the run succeeded or not.
pub async fn handle_screen_document(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    if request.document_key.trim().is_empty() {
        return Err(AppError::Validation(
            "document_key cannot be empty".to_string(),
        ));
    }

    let report = screen_document(
        state.store.as_ref(),
        state.completion.as_ref(),
        &request.document_key,
    )
    .await?;

    Ok(Json(report))
}
