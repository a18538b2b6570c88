//! Application Error - Unified error type for the application
//!
//! Crate-specific error enums convert into [`AppError`] so every HTTP failure
//! leaves the server in the same shape.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error.
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "No route for /nope");
/// assert_eq!(err.status_code(), 404);
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    /// Message safe to show to the client
    message: Cow<'static, str>,
    /// Underlying cause, kept for logs only
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Undecodable client input
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Unknown route or resource
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Keep the error this one was converted from
    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(source) => Some(source.as_ref()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::BadGateway, "Error parsing trivia data from provider");
        assert_eq!(err.kind(), ErrorKind::BadGateway);
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.message(), "Error parsing trivia data from provider");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::not_found("Route not found");
        assert_eq!(err.status_code(), 404);
        let err = AppError::bad_request("Invalid query string");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let io_err = std::io::Error::other("socket closed");
        let err = AppError::new(ErrorKind::InternalServerError, "Failed to fetch trivia")
            .with_source(io_err);

        assert_eq!(err.source().unwrap().to_string(), "socket closed");
        assert_eq!(
            err.to_string(),
            "[Internal Server Error] Failed to fetch trivia"
        );
    }
}
