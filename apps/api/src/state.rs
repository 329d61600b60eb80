use std::sync::Arc;

use crate::intake::store::DocumentStore;
use crate::screening::completion::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both collaborators are trait objects, constructed once at startup;
/// tests build the same state around in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub completion: Arc<dyn CompletionClient>,
}
