//! Retry with exponential backoff and jitter for the remote collaborators.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: f64,
    pub max_delay: Duration,
    /// Fraction of the computed delay added as random jitter, in [0, 1].
    pub jitter_fraction: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(10),
            jitter_fraction: 0.2,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Default::default()
        }
    }

    /// Deterministic delay for a 1-based attempt number, capped at
    /// `max_delay`. Jitter is applied separately.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32 - 1);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter_fraction <= 0.0 {
            return delay;
        }
        let spread = delay.as_secs_f64() * self.jitter_fraction;
        Duration::from_secs_f64(delay.as_secs_f64() + spread * rand::random::<f64>())
    }
}

/// Run `f` until it succeeds, retrying retryable errors up to
/// `max_attempts` with backoff.
pub async fn retry_with_backoff<F, T, E, Fut>(
    config: &RetryConfig,
    mut f: F,
    is_retryable: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match f().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("operation succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt < config.max_attempts && is_retryable(&e) {
                    let delay = config.jittered(config.delay_for_attempt(attempt));
                    warn!(
                        "operation failed on attempt {}/{}, retrying after {:?}",
                        attempt, config.max_attempts, delay
                    );
                    sleep(delay).await;
                } else {
                    return Err(e);
                }
            }
        }
    }
}

/// Whether an HTTP status is worth retrying: server errors plus timeout
/// and rate-limit responses.
pub fn is_http_retryable(status: u16) -> bool {
    matches!(status, 408 | 429 | 500..=599)
}
