pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/documents", post(handlers::handle_upload_document))
        .route(
            "/api/v1/screenings",
            post(handlers::handle_screen_document),
        )
        .with_state(state)
}
