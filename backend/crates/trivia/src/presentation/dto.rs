//! API DTOs (Data Transfer Objects)

use crate::domain::entities::{AnswerSubmission, AnswerVerdict, Question};
use kernel::id::QuestionId;
use serde::{Deserialize, Serialize};

/// Query for GET /questions and GET /trivia
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmountQuery {
    #[serde(default)]
    pub amount: Option<i64>,
}

/// Element of the GET /questions response
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub answers: Vec<String>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            category: question.category,
            kind: question.kind,
            difficulty: question.difficulty,
            question: question.question,
            answers: question.answers,
        }
    }
}

/// Element of the POST /checkanswers request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: String,
    pub selected_answer: String,
}

impl From<AnswerRequest> for AnswerSubmission {
    fn from(req: AnswerRequest) -> Self {
        AnswerSubmission::new(req.question_id, req.selected_answer)
    }
}

/// Element of the POST /checkanswers response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictResponse {
    pub question_id: String,
    pub correct: bool,
    pub correct_answer: String,
}

impl From<AnswerVerdict> for VerdictResponse {
    fn from(verdict: AnswerVerdict) -> Self {
        Self {
            question_id: verdict.question_id,
            correct: verdict.correct,
            correct_answer: verdict.correct_answer,
        }
    }
}
