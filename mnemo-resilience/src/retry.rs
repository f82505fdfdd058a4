//! Retry with bounded exponential backoff.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use mnemo_core::config::RetryConfig;
use mnemo_core::errors::MnemoResult;
use tracing::{debug, warn};

use crate::classify::{RetryClassifier, TransientSignatureClassifier};

/// Retries an async operation with exponential backoff.
///
/// Stateless across calls; clone and share freely. There is no cancellation:
/// a call runs to success, a permanent failure, or retry exhaustion. Callers
/// needing cancellation race the returned future against a timeout and drop
/// it.
#[derive(Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    classifier: Arc<dyn RetryClassifier>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryPolicy {
    /// A policy with the given budget and the default transient-signature
    /// classifier.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            classifier: Arc::new(TransientSignatureClassifier),
        }
    }

    /// Swap in a different failure taxonomy.
    pub fn with_classifier(mut self, classifier: Arc<dyn RetryClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation`, retrying transient failures until the budget of
    /// `max_retries` retries after the first attempt is spent.
    ///
    /// The original failure is returned unchanged (not re-wrapped) on
    /// exhaustion or on a permanent failure. No delay elapses before the
    /// first attempt; each attempt is a fresh invocation of `operation`.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> MnemoResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = MnemoResult<T>>,
    {
        let mut delay = self.config.initial_delay();
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if attempt > self.config.max_retries {
                        warn!(attempt, error = %error, "retry budget exhausted");
                        return Err(error);
                    }
                    if !self.classifier.is_transient(&error) {
                        return Err(error);
                    }
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, self.config.backoff_multiplier, self.config.max_delay());
                }
            }
        }
    }
}

/// The delay for the next retry: multiplied, capped at `max` on every step.
fn next_delay(current: Duration, multiplier: f64, max: Duration) -> Duration {
    current.mul_f64(multiplier).min(max)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use mnemo_core::errors::{MnemoError, StorageFailure};
    use proptest::prelude::*;

    use super::*;

    fn transient(message: &str) -> MnemoError {
        StorageFailure::new(message).into()
    }

    fn failing_then_ok(
        calls: Arc<AtomicU32>,
        failures: u32,
        message: &'static str,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = MnemoResult<u32>>>> {
        move || {
            let calls = calls.clone();
            Box::pin(async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= failures {
                    Err(transient(message))
                } else {
                    Ok(n)
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures_with_default_backoff() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = tokio::time::Instant::now();

        let result = RetryPolicy::default()
            .run(failing_then_ok(calls.clone(), 2, "request timeout"))
            .await
            .unwrap();

        assert_eq!(result, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 100ms before the second attempt, 200ms before the third.
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_fails_on_first_attempt_without_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        });
        let start = tokio::time::Instant::now();

        let err = policy
            .run(failing_then_ok(calls.clone(), 10, "503 service unavailable"))
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_failure_aborts_and_is_returned_unchanged() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: MnemoResult<()> = RetryPolicy::default()
            .run(|| {
                let calls = calls.clone();
                Box::pin(async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n == 1 {
                        Err(transient("etimedout"))
                    } else {
                        Err(StorageFailure::new("invalid filter expression")
                            .with_code("VDB_400")
                            .into())
                    }
                })
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match result.unwrap_err() {
            MnemoError::StorageFailure(failure) => {
                assert_eq!(failure.message, "invalid filter expression");
                assert_eq!(failure.code.as_deref(), Some("VDB_400"));
            }
            other => panic!("expected the original storage failure, got {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_capped_at_max_on_every_step() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(RetryConfig {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 300,
            backoff_multiplier: 10.0,
        });
        let start = tokio::time::Instant::now();

        let err = policy
            .run(failing_then_ok(calls.clone(), 10, "econnreset"))
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // 100ms, then 300ms (capped from 1000), then 300ms again.
        assert_eq!(start.elapsed(), Duration::from_millis(700));
        assert!(err.to_string().contains("econnreset"));
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_never_sleeps() {
        let start = tokio::time::Instant::now();
        let value = RetryPolicy::default()
            .run(|| async { Ok::<_, MnemoError>(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    proptest! {
        #[test]
        fn next_delay_never_exceeds_max(
            current_ms in 1u64..10_000,
            multiplier in 1.0f64..64.0,
            max_ms in 1u64..10_000,
        ) {
            let next = next_delay(
                Duration::from_millis(current_ms),
                multiplier,
                Duration::from_millis(max_ms),
            );
            prop_assert!(next <= Duration::from_millis(max_ms));
        }
    }
}
