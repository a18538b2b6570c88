//! Rate Limiting Infrastructure
//!
//! Serialized, spaced access to a rate-capped operation.
//!
//! [`RateLimiter::run`] lets exactly one operation execute at a time across all
//! callers, and never starts an operation until at least
//! [`RateLimitConfig::interval`] has passed since the previous one completed.
//!
//! ## Cancellation
//! Callers pass a [`CancellationToken`]. Cancelling it while the caller is queued
//! for the limiter or waiting out the interval fails the call with [`Interrupted`].
//! The token stays cancelled afterwards so the caller can observe it, and the
//! shared completion timestamp is left untouched.

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum spacing between the end of one operation and the start of the next
    pub interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
        }
    }
}

impl RateLimitConfig {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }
}

/// The wait for a rate-limit slot was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rate limit wait was interrupted")]
pub struct Interrupted;

/// Serializing throttle around a rate-capped operation
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Completion time of the most recent operation, `None` before the first one
    last_completion: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            last_completion: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Completion time of the most recent operation
    ///
    /// Queues behind any in-flight operation.
    pub async fn last_completion(&self) -> Option<Instant> {
        *self.last_completion.lock().await
    }

    /// Run `operation` once the limiter grants a slot
    ///
    /// The limiter stays locked for the whole wait and for the whole operation, so
    /// at most one operation is ever in flight. The completion timestamp is
    /// refreshed however the operation ends: success, error value, panic, or the
    /// returned future being dropped mid-flight.
    ///
    /// ## Returns
    /// * `Ok(T)` - the operation's own output, errors included
    /// * `Err(Interrupted)` - `cancel` fired before the operation started
    pub async fn run<F, Fut, T>(
        &self,
        cancel: &CancellationToken,
        operation: F,
    ) -> Result<T, Interrupted>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last_completion = tokio::select! {
            biased;
            guard = self.last_completion.lock() => guard,
            _ = cancel.cancelled() => {
                tracing::warn!("Cancelled while queued for rate limiter");
                return Err(Interrupted);
            }
        };

        if let Some(last) = *last_completion {
            self.wait_for_slot(last, cancel).await?;
        }

        let _stamp = CompletionStamp {
            slot: &mut *last_completion,
        };
        Ok(operation().await)
    }

    /// Sleep until `interval` has elapsed since `last`
    ///
    /// The remaining time is recomputed after every wake-up.
    async fn wait_for_slot(
        &self,
        last: Instant,
        cancel: &CancellationToken,
    ) -> Result<(), Interrupted> {
        let ready_at = last + self.config.interval;

        loop {
            let now = Instant::now();
            if now >= ready_at {
                return Ok(());
            }

            tracing::debug!(
                wait_ms = (ready_at - now).as_millis() as u64,
                "Waiting for rate limit slot"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!(
                        remaining_ms = (ready_at - Instant::now()).as_millis() as u64,
                        "Rate limit wait interrupted"
                    );
                    return Err(Interrupted);
                }
                _ = sleep_until(ready_at) => {}
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Writes the completion time when dropped
struct CompletionStamp<'a> {
    slot: &'a mut Option<Instant>,
}

impl Drop for CompletionStamp<'_> {
    fn drop(&mut self) {
        *self.slot = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const INTERVAL: Duration = Duration::from_millis(5000);

    fn limiter() -> RateLimiter {
        RateLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.interval, INTERVAL);
        assert_eq!(config.interval_ms(), 5000);
        assert_eq!(RateLimitConfig::new(250).interval, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_never_waits() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        let start = Instant::now();
        let value = limiter.run(&cancel, || async { 7 }).await;

        assert_eq!(value, Ok(7));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(limiter.last_completion().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        limiter.run(&cancel, || async {}).await.unwrap();
        let first_done = Instant::now();

        let started = limiter.run(&cancel, || async { Instant::now() }).await.unwrap();
        let gap = started - first_done;

        assert!(gap >= Duration::from_millis(4900), "gap was {:?}", gap);
        assert!(gap <= Duration::from_millis(5500), "gap was {:?}", gap);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_elapsed_waits_remainder() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        limiter.run(&cancel, || async {}).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3000)).await;

        let start = Instant::now();
        limiter.run(&cancel, || async {}).await.unwrap();
        let waited = start.elapsed();

        assert!(waited >= Duration::from_millis(1800), "waited {:?}", waited);
        assert!(waited <= Duration::from_millis(2200), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_once_interval_elapsed() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        limiter.run(&cancel, || async {}).await.unwrap();
        tokio::time::sleep(INTERVAL).await;

        let start = Instant::now();
        limiter.run(&cancel, || async {}).await.unwrap();

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spacing_measured_from_completion() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        // A slow operation: spacing counts from its end, not its start
        limiter
            .run(&cancel, || tokio::time::sleep(Duration::from_millis(2000)))
            .await
            .unwrap();
        let first_done = Instant::now();

        let started = limiter.run(&cancel, || async { Instant::now() }).await.unwrap();
        assert!(started - first_done >= Duration::from_millis(4900));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_operation_still_stamps_completion() {
        let limiter = limiter();
        let cancel = CancellationToken::new();

        let result: Result<(), &str> = limiter
            .run(&cancel, || async { Err("boom") })
            .await
            .unwrap();
        assert_eq!(result, Err("boom"));
        let failed_at = limiter.last_completion().await.unwrap();

        let started = limiter.run(&cancel, || async { Instant::now() }).await.unwrap();
        assert!(started - failed_at >= Duration::from_millis(4900));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_wait_keeps_token_cancelled_and_state_intact() {
        let limiter = Arc::new(limiter());
        let root = CancellationToken::new();

        limiter.run(&root, || async {}).await.unwrap();
        let stamped = limiter.last_completion().await.unwrap();

        let ran = Arc::new(AtomicUsize::new(0));
        let caller_token = root.child_token();
        let waiting = {
            let limiter = limiter.clone();
            let ran = ran.clone();
            let token = caller_token.clone();
            tokio::spawn(async move {
                let result = limiter
                    .run(&token, || async {
                        ran.fetch_add(1, Ordering::SeqCst);
                    })
                    .await;
                (result, token.is_cancelled())
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        caller_token.cancel();

        let (result, still_cancelled) = waiting.await.unwrap();
        assert_eq!(result, Err(Interrupted));
        assert!(still_cancelled);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(limiter.last_completion().await, Some(stamped));

        // The next caller still waits out the first interval
        let fresh = CancellationToken::new();
        let start = Instant::now();
        limiter.run(&fresh, || async {}).await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(4800), "waited {:?}", waited);
        assert!(waited <= Duration::from_millis(5000), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token_runs_when_no_wait_needed() {
        let limiter = limiter();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(limiter.run(&cancel, || async { 1 }).await, Ok(1));
        assert_eq!(limiter.run(&cancel, || async { 2 }).await, Err(Interrupted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized_and_spaced() {
        let limiter = Arc::new(limiter());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();

        for _ in 0..3 {
            let limiter = limiter.clone();
            let in_flight = in_flight.clone();
            handles.push(tokio::spawn(async move {
                let cancel = CancellationToken::new();
                limiter
                    .run(&cancel, || async {
                        assert_eq!(in_flight.fetch_add(1, Ordering::SeqCst), 0);
                        let started = Instant::now();
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                        (started, Instant::now())
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut spans = Vec::new();
        for handle in handles {
            spans.push(handle.await.unwrap());
        }
        spans.sort();

        for pair in spans.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start - prev_end >= INTERVAL);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_operation_still_stamps_completion() {
        let limiter = Arc::new(limiter());
        let cancel = CancellationToken::new();

        let task = {
            let limiter = limiter.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                limiter
                    .run(&cancel, || tokio::time::sleep(Duration::from_secs(60)))
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert!(limiter.last_completion().await.is_some());
    }
}
