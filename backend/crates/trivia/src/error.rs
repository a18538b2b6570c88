//! Trivia Error Types
//!
//! This module provides trivia-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::rate_limit::Interrupted;
use thiserror::Error;

/// Trivia-specific result type alias
pub type TriviaResult<T> = Result<T, TriviaError>;

/// The provider's payload could not be turned into questions
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body is not a JSON document
    #[error("failed to parse trivia response")]
    Malformed(#[source] serde_json::Error),

    /// `results` absent or not an array
    #[error("results missing or not an array")]
    ResultsMissing,

    /// A result lacks one of the required question fields
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field that must hold a list holds something else
    #[error("field is not an array: {0}")]
    NotAnArray(&'static str),
}

/// Trivia-specific error variants
#[derive(Debug, Error)]
pub enum TriviaError {
    /// Rejected input, checked before any upstream call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport-level failure talking to the provider
    #[error("Upstream trivia provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Provider returned unusable data
    #[error("Invalid trivia data: {0}")]
    Parse(#[from] ParseError),

    /// Rate limiter wait was cancelled
    #[error("Interrupted while waiting for the trivia rate limit")]
    Interrupted,

    /// Answer submitted for an ID that was never served
    #[error("Question ID not found: {0}")]
    QuestionNotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TriviaError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TriviaError::InvalidArgument(_) | TriviaError::QuestionNotFound(_) => {
                ErrorKind::BadRequest
            }
            TriviaError::Parse(_) => ErrorKind::BadGateway,
            TriviaError::Interrupted => ErrorKind::ServiceUnavailable,
            TriviaError::UpstreamUnavailable(_) | TriviaError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to return to clients
    pub fn client_message(&self) -> String {
        match self {
            TriviaError::InvalidArgument(msg) => msg.clone(),
            TriviaError::QuestionNotFound(id) => format!("Invalid question ID: {}", id),
            TriviaError::Parse(_) => "Error parsing trivia data from provider".to_string(),
            TriviaError::Interrupted => "Service temporarily unavailable".to_string(),
            TriviaError::UpstreamUnavailable(_) | TriviaError::Internal(_) => {
                "Failed to fetch trivia".to_string()
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TriviaError::UpstreamUnavailable(msg) => {
                tracing::error!(message = %msg, "Trivia provider unavailable");
            }
            TriviaError::Internal(msg) => {
                tracing::error!(message = %msg, "Trivia internal error");
            }
            TriviaError::Parse(e) => {
                tracing::warn!(error = %e, "Trivia provider sent unusable data");
            }
            TriviaError::Interrupted => {
                tracing::warn!("Trivia request interrupted");
            }
            _ => {
                tracing::debug!(error = %self, "Trivia request rejected");
            }
        }
    }
}

impl From<Interrupted> for TriviaError {
    fn from(_: Interrupted) -> Self {
        TriviaError::Interrupted
    }
}

impl From<TriviaError> for AppError {
    fn from(err: TriviaError) -> Self {
        let kind = err.kind();
        let message = err.client_message();
        AppError::new(kind, message).with_source(err)
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
