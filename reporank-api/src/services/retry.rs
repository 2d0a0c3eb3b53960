//! Reusable retry policy for upstream calls
//!
//! Replaces ad-hoc attempt counters: a policy value holds the attempt budget
//! and backoff base, and drives any operation that fails with a classified
//! [`UpstreamError`]. Only retryable failures consume the budget; everything
//! else escalates immediately.

use std::future::Future;
use std::time::Duration;

use super::github_client::UpstreamError;

/// Attempt budget plus linear-multiplier backoff (base delay × attempt
/// number, so successive waits grow).
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Backoff before attempt `attempt + 1`, given `attempt` just failed
    /// (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Run `operation` until it succeeds, fails non-retryably, or the
    /// attempt budget is exhausted. The last error is returned unchanged.
    pub async fn run<T, F, Fut>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retryable upstream failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    if attempt > 1 {
                        tracing::error!(
                            operation = operation_name,
                            attempt,
                            error = %err,
                            "Retries exhausted"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}
