//! Domain Entities
//!
//! Value objects exchanged between the orchestrator and its callers.

use kernel::id::QuestionId;

/// A question as served to players
///
/// `answers` holds the correct answer shuffled among the incorrect ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub category: String,
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub answers: Vec<String>,
}

/// A player's chosen answer for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    /// Raw ID as sent by the client; may not name any served question
    pub question_id: String,
    pub selected_answer: String,
}

impl AnswerSubmission {
    pub fn new(question_id: impl Into<String>, selected_answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_answer: selected_answer.into(),
        }
    }
}

/// Result of checking one submission
///
/// The correct answer is revealed whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub question_id: String,
    pub correct: bool,
    pub correct_answer: String,
}
