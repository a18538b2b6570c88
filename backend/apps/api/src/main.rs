//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia::{
    InMemoryAnswerRegistry, OpenTdbClient, TriviaConfig, TriviaOrchestrator, trivia_router,
};

use kernel::error::app_error::AppError;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,trivia=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Trivia wiring: one provider client, one registry, one rate limiter
    let trivia_config = TriviaConfig::default();
    tracing::info!(
        upstream = %trivia_config.api_base_url(),
        interval_ms = trivia_config.rate_limit.interval_ms(),
        "Trivia provider configured"
    );

    let source = OpenTdbClient::new(&trivia_config)?;
    let registry = InMemoryAnswerRegistry::new();
    let orchestrator = Arc::new(TriviaOrchestrator::new(
        Arc::new(source),
        Arc::new(registry),
        trivia_config,
    ));

    // Cancelled on Ctrl-C; interrupts requests still waiting on the rate limiter
    let shutdown = CancellationToken::new();

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .merge(trivia_router(orchestrator, shutdown.clone()))
        .fallback(|| async { AppError::not_found("Route not found") })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("API_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c(), shutdown))
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves once `signal` fires, cancelling `shutdown` first
///
/// Never resolves if the signal handler cannot be installed.
async fn shutdown_signal<F>(signal: F, shutdown: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(
            error = %e,
            "Failed to listen for shutdown signal, running until killed"
        );
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received, draining requests");
    shutdown.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_signal_cancels_token() {
        let shutdown = CancellationToken::new();

        shutdown_signal(async { Ok(()) }, shutdown.clone()).await;

        assert!(shutdown.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_signal_install_keeps_serving() {
        let shutdown = CancellationToken::new();
        let failing = async { Err(std::io::Error::other("no signal handler")) };

        let result = tokio::time::timeout(
            Duration::from_secs(3600),
            shutdown_signal(failing, shutdown.clone()),
        )
        .await;

        assert!(result.is_err(), "shutdown future resolved");
        assert!(!shutdown.is_cancelled());
    }
}
