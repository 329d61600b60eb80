// Document intake: staging-bucket access and first-page text extraction.
// A screening run owns its staged document from fetch until the orchestrator
// releases it; nothing here persists beyond the run.

pub mod extract;
pub mod store;
