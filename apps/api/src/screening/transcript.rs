//! Conversation state threaded through the screening stages.
//!
//! A transcript starts from the candidate's résumé text and grows by one
//! model turn per stage. Later stages see every earlier turn, which is how
//! the score stage reads the match analysis and the email stage reads both
//! without re-sending anything.

use serde_json::Value;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One turn of the screening conversation.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

/// Ordered history of the screening conversation. Always starts with the
/// résumé as a user turn; stages only ever append.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Opens a transcript with the résumé text as the first user turn.
    /// Callers pass text that already survived extraction, so the seed
    /// is never empty.
    pub fn seed(resume_text: &str) -> Self {
        Self {
            entries: vec![TranscriptEntry {
                role: Role::User,
                content: resume_text.to_string(),
            }],
        }
    }

    /// Appends a stage's output as a model turn, serialized as compact JSON.
    pub fn push_model(&mut self, output: &Value) {
        self.entries.push(TranscriptEntry {
            role: Role::Model,
            content: output.to_string(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seed_starts_with_resume_as_user_turn() {
        let transcript = Transcript::seed("Jane Doe\nAI Engineer");
        assert_eq!(transcript.entries().len(), 1);
        assert_eq!(transcript.entries()[0].role, Role::User);
        assert!(transcript.entries()[0].content.contains("Jane Doe"));
    }

    #[test]
    fn test_push_model_appends_in_order() {
        let mut transcript = Transcript::seed("resume");
        transcript.push_model(&json!({"score": 8}));
        transcript.push_model(&json!({"email": "Dear X"}));

        assert_eq!(transcript.entries().len(), 3);
        assert_eq!(transcript.entries()[1].role, Role::Model);
        assert!(transcript.entries()[1].content.contains("\"score\":8"));
        assert_eq!(transcript.entries()[2].role, Role::Model);
        assert!(transcript.entries()[2].content.contains("email"));
    }
}
