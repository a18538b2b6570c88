//! Outbound HTTP client utilities
//!
//! Common construction of the `reqwest` client used to reach upstream providers.

/// Error when building the outbound client
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),
    #[error("HTTP client construction failed: {0}")]
    Build(#[from] reqwest::Error),
}

/// Build the shared outbound client
///
/// No request timeout is configured: callers decide how long an upstream call may take.
///
/// ## Arguments
/// * `user_agent` - value sent in the `User-Agent` header of every request
pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client, ClientBuildError> {
    if user_agent.trim().is_empty() || user_agent.chars().any(char::is_control) {
        return Err(ClientBuildError::InvalidUserAgent(user_agent.to_string()));
    }

    let client = reqwest::Client::builder().user_agent(user_agent).build()?;

    tracing::debug!(user_agent, "Built outbound HTTP client");

    Ok(client)
}
