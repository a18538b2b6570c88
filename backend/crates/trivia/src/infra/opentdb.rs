//! Open Trivia Database client
//!
//! Plain GET against the provider; no retries, no caching.

use crate::application::config::{PARAM_AMOUNT, TriviaConfig};
use crate::domain::repository::TriviaSource;
use crate::error::{TriviaError, TriviaResult};
use platform::client::build_http_client;
use reqwest::{Client, Url};

/// Provider client
#[derive(Debug, Clone)]
pub struct OpenTdbClient {
    client: Client,
    base_url: Url,
}

impl OpenTdbClient {
    /// Client for the configured provider endpoint
    pub fn new(config: &TriviaConfig) -> TriviaResult<Self> {
        let base_url = Url::parse(&config.api_base_url())
            .map_err(|e| TriviaError::Internal(format!("Invalid upstream URL: {}", e)))?;
        let client = build_http_client(&config.user_agent)
            .map_err(|e| TriviaError::Internal(e.to_string()))?;

        Ok(Self::with_base_url(client, base_url))
    }

    /// Client for an arbitrary endpoint
    pub fn with_base_url(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// `<base>?amount=<amount>`
    pub fn request_url(&self, amount: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(PARAM_AMOUNT, &amount.to_string());
        url
    }
}

impl TriviaSource for OpenTdbClient {
    async fn fetch(&self, amount: u32) -> TriviaResult<String> {
        let url = self.request_url(amount);
        tracing::debug!(%url, "Fetching trivia from provider");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TriviaError::UpstreamUnavailable(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| TriviaError::UpstreamUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, path: &str) -> OpenTdbClient {
        let base = Url::parse(&format!("http://{}{}", addr, path)).unwrap();
        OpenTdbClient::with_base_url(Client::new(), base)
    }

    #[test]
    fn test_request_url() {
        let client = OpenTdbClient::new(&TriviaConfig::default()).unwrap();
        assert_eq!(
            client.request_url(3).as_str(),
            "https://opentdb.com/api.php?amount=3"
        );
        assert_eq!(
            client.request_url(50).as_str(),
            "https://opentdb.com/api.php?amount=50"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_amount() {
        let app = Router::new().route(
            "/api.php",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                format!(r#"{{"amount":"{}"}}"#, params["amount"])
            }),
        );
        let addr = serve(app).await;

        let body = client_for(addr, "/api.php").fetch(4).await.unwrap();
        assert_eq!(body, r#"{"amount":"4"}"#);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_upstream_unavailable() {
        let app = Router::new().route(
            "/api.php",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
        );
        let addr = serve(app).await;

        let err = client_for(addr, "/api.php").fetch(1).await.unwrap_err();
        assert!(matches!(err, TriviaError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_upstream_unavailable() {
        // Bind then drop to get a port with nothing listening
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = client_for(addr, "/api.php").fetch(1).await.unwrap_err();
        assert!(matches!(err, TriviaError::UpstreamUnavailable(_)));
    }
}
