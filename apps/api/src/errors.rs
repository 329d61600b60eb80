use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// A screening run fails as a whole: any variant produced mid-pipeline aborts
/// the remaining stages and surfaces here. Release of the staged document is
/// handled by the orchestrator bracket and never feeds back into this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Stage '{stage}' returned malformed output: {detail}")]
    SchemaConformance { stage: String, detail: String },

    #[error("Model provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Shorthand for a schema-conformance failure in a named stage.
    pub fn schema(stage: &str, detail: impl Into<String>) -> Self {
        AppError::SchemaConformance {
            stage: stage.to_string(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::SchemaConformance { stage, detail } => {
                tracing::error!("Schema conformance failure in stage '{stage}': {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCHEMA_CONFORMANCE",
                    format!("The model response for stage '{stage}' did not match its schema"),
                )
            }
            AppError::Provider(e) => {
                tracing::error!("Model provider error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The model provider call failed".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
