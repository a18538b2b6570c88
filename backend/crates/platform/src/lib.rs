//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Outbound HTTP client construction
//! - Rate limiting infrastructure (serialized, spaced access to a rate-capped upstream)

pub mod client;
pub mod rate_limit;
