// Screening pipeline: match analysis, scoring, email, interview questions.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod completion;
pub mod email;
pub mod handlers;
pub mod match_analysis;
pub mod orchestrator;
pub mod prompts;
pub mod questions;
pub mod schedule;
pub mod scoring;
pub mod transcript;
