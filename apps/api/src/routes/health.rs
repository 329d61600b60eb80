use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe; reports the running service version without touching
/// S3 or the model provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sift-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
