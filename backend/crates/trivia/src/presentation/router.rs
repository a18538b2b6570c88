//! Trivia Router

use crate::application::orchestrator::TriviaOrchestrator;
use crate::domain::repository::{AnswerRepository, TriviaSource};
use crate::presentation::handlers::{self, TriviaAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Create the trivia router for any source and answer store
///
/// Cancelling `shutdown` interrupts every request still waiting on the rate limiter.
pub fn trivia_router<S, R>(
    orchestrator: Arc<TriviaOrchestrator<S, R>>,
    shutdown: CancellationToken,
) -> Router
where
    S: TriviaSource + Sync + 'static,
    R: AnswerRepository + 'static,
{
    let state = TriviaAppState {
        orchestrator,
        shutdown,
    };

    Router::new()
        .route("/questions", get(handlers::get_questions::<S, R>))
        .route("/checkanswers", post(handlers::check_answers::<S, R>))
        .route("/trivia", get(handlers::get_raw_trivia::<S, R>))
        .with_state(state)
}
