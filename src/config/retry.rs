//! Retry policy and backoff.

use rand::Rng;
use std::time::Duration;

use crate::error::SesError;

/// Exponential backoff policy applied to retryable failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_attempts: u32,

    /// Backoff before the first retry.
    pub initial_backoff: Duration,

    /// Upper bound for any single backoff.
    pub max_backoff: Duration,

    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,

    /// Use "full jitter": a uniform delay in `[0, backoff)`.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(20),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    ///
    /// ```
    /// use std::time::Duration;
    /// use integrations_aws_ses_classic::config::RetryConfig;
    ///
    /// let config = RetryConfig { jitter: false, ..RetryConfig::default() };
    /// assert_eq!(config.calculate_delay(2), Duration::from_millis(400));
    /// ```
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let backoff_millis = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi(attempt.min(63) as i32);
        let capped = Duration::from_millis(backoff_millis as u64).min(self.max_backoff);

        if self.jitter && !capped.is_zero() {
            let millis = rand::thread_rng().gen_range(0..capped.as_millis() as u64);
            Duration::from_millis(millis)
        } else {
            capped
        }
    }

    /// Whether `error` should be retried given `attempt` retries so far.
    pub fn should_retry(&self, attempt: u32, error: &SesError) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }
}
