//! Application Configuration
//!
//! Configuration for the trivia application layer. The upstream endpoint and the
//! rate-limit interval are fixed constants.

use std::time::Duration;

/// Re-export the limiter configuration from platform
pub use platform::rate_limit::RateLimitConfig;

pub const TRIVIA_API_HOST: &str = "opentdb.com";
pub const TRIVIA_API_PATH: &str = "/api.php";
pub const PARAM_AMOUNT: &str = "amount";
pub const RATE_LIMIT_MS: u64 = 5000;

/// Trivia application configuration
#[derive(Debug, Clone)]
pub struct TriviaConfig {
    /// Upstream provider host (always reached over HTTPS)
    pub api_host: String,
    /// Upstream provider path
    pub api_path: String,
    /// Spacing between upstream calls
    pub rate_limit: RateLimitConfig,
    /// Amount used by `GET /questions` when none is given
    pub default_amount: i64,
    /// Amount used by the raw passthrough when none is given
    pub raw_default_amount: i64,
    /// User-Agent sent upstream
    pub user_agent: String,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            api_host: TRIVIA_API_HOST.to_string(),
            api_path: TRIVIA_API_PATH.to_string(),
            rate_limit: RateLimitConfig::new(RATE_LIMIT_MS),
            default_amount: 5,
            raw_default_amount: 1,
            user_agent: concat!("trivia-backend/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TriviaConfig {
    /// Same config with a different rate-limit interval
    pub fn with_rate_limit_interval(self, interval: Duration) -> Self {
        Self {
            rate_limit: RateLimitConfig { interval },
            ..self
        }
    }

    pub fn api_base_url(&self) -> String {
        format!("https://{}{}", self.api_host, self.api_path)
    }
}
