//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Question, AnswerSubmission, AnswerVerdict)
//! - Domain services (provider response validation, answer shuffling)
//! - Repository traits (trivia source, answer registry)

pub mod entities;
pub mod repository;
pub mod services;
