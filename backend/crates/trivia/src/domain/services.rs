//! Domain Services
//!
//! Validation and conversion of the provider's payload.
//!
//! Expected shape:
//! `{"results":[{"category","type","difficulty","question","correct_answer","incorrect_answers":[..]}, ..]}`

use crate::domain::entities::Question;
use crate::error::ParseError;
use kernel::id::QuestionId;
use rand::seq::SliceRandom;
use serde_json::Value;

/// Fields every provider result must carry (presence only, empty values are fine)
pub const REQUIRED_FIELDS: [&str; 6] = [
    "category",
    "type",
    "difficulty",
    "question",
    "correct_answer",
    "incorrect_answers",
];

/// Questions parsed from one provider response, plus their answer key
#[derive(Debug, Clone)]
pub struct ParsedBatch {
    /// Same order as the provider's `results`
    pub questions: Vec<Question>,
    pub answer_key: Vec<(QuestionId, String)>,
}

/// Parse and validate a raw provider response
///
/// Any invalid result fails the whole batch.
pub fn parse_trivia_response(raw: &str) -> Result<ParsedBatch, ParseError> {
    let root: Value = serde_json::from_str(raw).map_err(ParseError::Malformed)?;

    let results = root
        .get("results")
        .and_then(Value::as_array)
        .ok_or(ParseError::ResultsMissing)?;

    let mut questions = Vec::with_capacity(results.len());
    let mut answer_key = Vec::with_capacity(results.len());

    for node in results {
        let (question, correct_answer) = question_from_node(node)?;
        answer_key.push((question.id, correct_answer));
        questions.push(question);
    }

    Ok(ParsedBatch {
        questions,
        answer_key,
    })
}

/// Check that a result node carries every required field
pub fn validate_result_node(node: &Value) -> Result<(), ParseError> {
    for field in REQUIRED_FIELDS {
        if node.get(field).is_none() {
            return Err(ParseError::MissingField(field));
        }
    }
    Ok(())
}

/// Correct answer placed among the incorrect ones in uniformly random order
pub fn shuffle_answers(correct_answer: &str, incorrect_answers: Vec<String>) -> Vec<String> {
    let mut answers = incorrect_answers;
    answers.push(correct_answer.to_string());
    answers.shuffle(&mut rand::rng());
    answers
}

fn question_from_node(node: &Value) -> Result<(Question, String), ParseError> {
    validate_result_node(node)?;

    let correct_answer = text(&node["correct_answer"]);
    let incorrect_answers = node["incorrect_answers"]
        .as_array()
        .ok_or(ParseError::NotAnArray("incorrect_answers"))?
        .iter()
        .map(text)
        .collect();

    let question = Question {
        id: QuestionId::new(),
        category: text(&node["category"]),
        kind: text(&node["type"]),
        difficulty: text(&node["difficulty"]),
        question: text(&node["question"]),
        answers: shuffle_answers(&correct_answer, incorrect_answers),
    };

    Ok((question, correct_answer))
}

/// Strings as-is, `null` as empty, other scalars as their JSON text
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // The provider sends `null` for absent text, never the word "null"
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
