//! HTTP Handlers

use crate::application::orchestrator::TriviaOrchestrator;
use crate::domain::entities::AnswerSubmission;
use crate::domain::repository::{AnswerRepository, TriviaSource};
use crate::error::TriviaResult;
use crate::presentation::dto::{AmountQuery, AnswerRequest, QuestionResponse, VerdictResponse};
use crate::presentation::extract::{AppJson, AppQuery};
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared state for trivia handlers
pub struct TriviaAppState<S, R>
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    pub orchestrator: Arc<TriviaOrchestrator<S, R>>,
    /// Parent of every per-request token; cancelled on server shutdown
    pub shutdown: CancellationToken,
}

// Derived Clone would demand `S: Clone + R: Clone`
impl<S, R> Clone for TriviaAppState<S, R>
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

/// GET /questions
pub async fn get_questions<S, R>(
    State(state): State<TriviaAppState<S, R>>,
    AppQuery(query): AppQuery<AmountQuery>,
) -> TriviaResult<Json<Vec<QuestionResponse>>>
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    let amount = query
        .amount
        .unwrap_or(state.orchestrator.config().default_amount);
    let cancel = state.shutdown.child_token();

    let questions = state.orchestrator.get_questions(amount, &cancel).await?;

    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

/// POST /checkanswers
pub async fn check_answers<S, R>(
    State(state): State<TriviaAppState<S, R>>,
    AppJson(req): AppJson<Vec<AnswerRequest>>,
) -> TriviaResult<Json<Vec<VerdictResponse>>>
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    let submissions: Vec<AnswerSubmission> = req.into_iter().map(Into::into).collect();

    let verdicts = state.orchestrator.check_answers(&submissions)?;

    Ok(Json(verdicts.into_iter().map(Into::into).collect()))
}

/// GET /trivia
///
/// Provider body passed through untouched.
pub async fn get_raw_trivia<S, R>(
    State(state): State<TriviaAppState<S, R>>,
    AppQuery(query): AppQuery<AmountQuery>,
) -> TriviaResult<impl IntoResponse>
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    let amount = query
        .amount
        .unwrap_or(state.orchestrator.config().raw_default_amount);
    let cancel = state.shutdown.child_token();

    let body = state.orchestrator.get_raw_trivia(amount, &cancel).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
