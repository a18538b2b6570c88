//! Trivia Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, response parsing, repository traits
//! - `application/` - Configuration and the orchestrator use cases
//! - `infra/` - Upstream provider client and the in-memory answer registry
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Upstream Model
//! - Every call to the trivia provider goes through one shared rate limiter:
//!   one request in flight at a time, spaced by the configured interval
//! - Correct answers never leave the server until an answer is checked
//! - Question IDs are generated here, not by the provider

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::TriviaConfig;
pub use application::orchestrator::TriviaOrchestrator;
pub use error::{ParseError, TriviaError, TriviaResult};
pub use infra::memory::InMemoryAnswerRegistry;
pub use infra::opentdb::OpenTdbClient;
pub use presentation::router::trivia_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
