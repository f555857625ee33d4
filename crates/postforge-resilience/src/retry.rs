// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exponential backoff retry policy.

use std::future::Future;
use std::time::Duration;

use postforge_config::model::{GenerationConfig, RetryConfig};
use postforge_core::{ErrorKind, PostforgeError};
use tracing::{debug, warn};

/// Default first backoff step.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
/// Default backoff ceiling.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Retry budget and backoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `0` disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Build from the `[retry]` and `[generation]` config sections.
    pub fn from_config(retry: &RetryConfig, generation: &GenerationConfig) -> Self {
        Self {
            max_retries: generation.max_retries,
            base_delay: Duration::from_millis(retry.base_delay_ms),
            max_delay: Duration::from_millis(retry.max_delay_ms),
        }
    }

    /// Backoff before retry number `attempt + 1`: `min(base * 2^attempt, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Whether a failure of `kind` on zero-based `attempt` earns another try.
    pub fn should_retry(&self, kind: ErrorKind, attempt: u32) -> bool {
        kind.is_retryable() && attempt < self.max_retries
    }

    /// Run `op` until it succeeds, fails with a non-retryable kind, or the
    /// budget runs out. The last error is returned.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, PostforgeError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, PostforgeError>>,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    let kind = err.kind();
                    if !self.should_retry(kind, attempt) {
                        return Err(err);
                    }
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error_kind = %kind,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, will retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_doubles_then_caps() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..6).map(|a| policy.delay_for(a).as_millis() as u64).collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 10_000, 10_000]);
    }

    #[test]
    fn huge_attempt_does_not_overflow() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(64), DEFAULT_MAX_DELAY);
    }

    #[test]
    fn only_transient_kinds_are_retried() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(ErrorKind::RateLimit, 0));
        assert!(policy.should_retry(ErrorKind::NetworkError, 1));
        assert!(!policy.should_retry(ErrorKind::NetworkError, 2));
        assert!(!policy.should_retry(ErrorKind::GenerationTimeout, 0));
        assert!(!policy.should_retry(ErrorKind::ContentModeration, 0));
    }

    #[test]
    fn built_from_config_sections() {
        let retry = RetryConfig {
            base_delay_ms: 250,
            max_delay_ms: 900,
        };
        let generation = GenerationConfig {
            max_retries: 4,
            ..GenerationConfig::default()
        };
        let policy = RetryPolicy::from_config(&retry, &generation);
        assert_eq!(policy.max_retries, 4);
        assert_eq!(policy.delay_for(2), Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn run_retries_transient_errors_with_backoff() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();
        let start = tokio::time::Instant::now();

        let counter = calls.clone();
        let result = policy
            .run(|_| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(PostforgeError::remote(ErrorKind::ServiceDisruption, "503"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s then 2s of backoff.
        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert!(start.elapsed() < Duration::from_millis(3100));
    }

    #[tokio::test(start_paused = true)]
    async fn run_gives_up_on_permanent_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = RetryPolicy::default()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(PostforgeError::remote(ErrorKind::ApiError, "bad request")) }
            })
            .await;

        assert!(matches!(result, Err(PostforgeError::Remote { kind: ErrorKind::ApiError, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn run_returns_last_error_when_budget_exhausted() {
        let policy = RetryPolicy::new(1, Duration::from_millis(10), Duration::from_millis(50));
        let result: Result<(), _> = policy
            .run(|attempt| async move {
                Err(PostforgeError::remote(
                    ErrorKind::RateLimit,
                    format!("attempt {attempt}"),
                ))
            })
            .await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("attempt 1"));
    }
}
