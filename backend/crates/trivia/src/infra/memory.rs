//! In-memory answer registry
//!
//! Process-lifetime store; entries are never evicted.

use crate::domain::repository::AnswerRepository;
use kernel::id::QuestionId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Question ID -> correct answer, safe for concurrent readers and writers
#[derive(Debug, Default)]
pub struct InMemoryAnswerRegistry {
    answers: RwLock<HashMap<String, String>>,
}

impl InMemoryAnswerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Poisoned locks still hold whole entries.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.answers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.answers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnswerRepository for InMemoryAnswerRegistry {
    fn record(&self, question_id: &QuestionId, correct_answer: String) {
        self.write().insert(question_id.to_string(), correct_answer);
    }

    fn record_all(&self, answer_key: Vec<(QuestionId, String)>) {
        let count = answer_key.len();
        let mut answers = self.write();
        answers.extend(
            answer_key
                .into_iter()
                .map(|(question_id, correct_answer)| (question_id.to_string(), correct_answer)),
        );
        tracing::debug!(recorded = count, total = answers.len(), "Recorded answer key");
    }

    fn lookup(&self, question_id: &str) -> Option<String> {
        self.read().get(question_id).cloned()
    }
}
