//! Trivia Orchestrator
//!
//! Facade over the provider, the rate limiter, the response parser and the
//! answer registry.

use crate::application::config::TriviaConfig;
use crate::domain::entities::{AnswerSubmission, AnswerVerdict, Question};
use crate::domain::repository::{AnswerRepository, TriviaSource};
use crate::domain::services::parse_trivia_response;
use crate::error::{TriviaError, TriviaResult};
use platform::rate_limit::RateLimiter;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Trivia Orchestrator
///
/// Owns the rate limiter: every upstream call made through one orchestrator
/// shares a single slot.
pub struct TriviaOrchestrator<S, R>
where
    S: TriviaSource,
    R: AnswerRepository,
{
    source: Arc<S>,
    answers: Arc<R>,
    limiter: RateLimiter,
    config: Arc<TriviaConfig>,
}

impl<S, R> TriviaOrchestrator<S, R>
where
    S: TriviaSource + Sync,
    R: AnswerRepository,
{
    pub fn new(source: Arc<S>, answers: Arc<R>, config: TriviaConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            source,
            answers,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TriviaConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn answers(&self) -> &R {
        &self.answers
    }

    /// Raw provider body for `amount` questions
    pub async fn get_raw_trivia(
        &self,
        amount: i64,
        cancel: &CancellationToken,
    ) -> TriviaResult<String> {
        let amount = validate_amount(amount)?;
        self.fetch_throttled(amount, cancel).await
    }

    /// Fetch, parse and register a batch of questions
    ///
    /// The number of questions returned is whatever the provider sent.
    pub async fn get_questions(
        &self,
        amount: i64,
        cancel: &CancellationToken,
    ) -> TriviaResult<Vec<Question>> {
        let amount = validate_amount(amount)?;
        let raw = self.fetch_throttled(amount, cancel).await?;

        let batch = parse_trivia_response(&raw)?;
        self.answers.record_all(batch.answer_key);

        tracing::info!(
            requested = amount,
            served = batch.questions.len(),
            "Served trivia questions"
        );

        Ok(batch.questions)
    }

    pub fn check_answers(
        &self,
        submissions: &[AnswerSubmission],
    ) -> TriviaResult<Vec<AnswerVerdict>> {
        let verdicts = self.answers.check_many(submissions)?;

        tracing::info!(
            checked = verdicts.len(),
            correct = verdicts.iter().filter(|v| v.correct).count(),
            "Checked answers"
        );

        Ok(verdicts)
    }

    pub fn check_answer(&self, submission: &AnswerSubmission) -> TriviaResult<AnswerVerdict> {
        self.answers.check_one(submission)
    }

    async fn fetch_throttled(
        &self,
        amount: u32,
        cancel: &CancellationToken,
    ) -> TriviaResult<String> {
        self.limiter.run(cancel, || self.source.fetch(amount)).await?
    }
}

/// Amount must be in `1..=u32::MAX`
fn validate_amount(amount: i64) -> TriviaResult<u32> {
    if amount <= 0 {
        return Err(TriviaError::InvalidArgument(
            "amount must be greater than zero".to_string(),
        ));
    }
    u32::try_from(amount)
        .map_err(|_| TriviaError::InvalidArgument(format!("amount is too large: {}", amount)))
}
