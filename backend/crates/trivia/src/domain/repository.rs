//! Repository Traits
//!
//! Interfaces for the upstream provider and the answer store. Implementations are in
//! the infrastructure layer.

use crate::domain::entities::{AnswerSubmission, AnswerVerdict};
use crate::error::{TriviaError, TriviaResult};
use kernel::id::QuestionId;

/// Upstream trivia provider
#[trait_variant::make(TriviaSource: Send)]
pub trait LocalTriviaSource {
    /// Fetch a raw response body asking for `amount` questions
    async fn fetch(&self, amount: u32) -> TriviaResult<String>;
}

/// Store of question ID -> correct answer
///
/// Entries are written once when a question is served and never updated.
pub trait AnswerRepository: Send + Sync {
    /// Record the correct answer for a served question
    fn record(&self, question_id: &QuestionId, correct_answer: String);

    /// Record a whole batch
    fn record_all(&self, answer_key: Vec<(QuestionId, String)>) {
        for (question_id, correct_answer) in answer_key {
            self.record(&question_id, correct_answer);
        }
    }

    /// Correct answer for `question_id`, if it was ever served
    fn lookup(&self, question_id: &str) -> Option<String>;

    /// Check a single submission (exact, case-sensitive comparison)
    fn check_one(&self, submission: &AnswerSubmission) -> TriviaResult<AnswerVerdict> {
        let correct_answer = self
            .lookup(&submission.question_id)
            .ok_or_else(|| TriviaError::QuestionNotFound(submission.question_id.clone()))?;

        Ok(AnswerVerdict {
            question_id: submission.question_id.clone(),
            correct: correct_answer == submission.selected_answer,
            correct_answer,
        })
    }

    /// Check submissions in order, stopping at the first unknown ID
    fn check_many(&self, submissions: &[AnswerSubmission]) -> TriviaResult<Vec<AnswerVerdict>> {
        submissions
            .iter()
            .map(|submission| self.check_one(submission))
            .collect()
    }
}
