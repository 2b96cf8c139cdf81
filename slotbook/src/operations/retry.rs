//! Retry policy for operations that can lose a race.

use std::thread;
use std::time::Duration;

use crate::config::schema::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS};
use crate::config::Config;
use crate::error::{Error, Result};

/// How many times a contended operation is attempted, and how long to wait
/// between attempts.
///
/// The wait before attempt `n + 1` is `backoff * n`.
///
/// # Examples
///
/// ```
/// use slotbook::operations::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(4, Duration::from_millis(5));
/// assert_eq!(policy.delay_for(3), Duration::from_millis(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least 1.
    pub max_attempts: u32,
    /// Base delay, multiplied by the number of failed attempts so far.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` is clamped to at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Policy from the `booking` section of a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_attempts(), config.retry_backoff())
    }

    /// A policy that tries once and never sleeps.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Delay after the given (1-based) failed attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }

    /// Sleeps after a failed attempt, unless it was the last one.
    pub(crate) fn pause(&self, attempt: u32) {
        if attempt < self.max_attempts {
            let delay = self.delay_for(attempt);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }

    /// Runs `op` until it stops failing on the write lock.
    ///
    /// Lock contention is retried up to `max_attempts` times with the
    /// configured backoff; any other error is returned at once. `what` names
    /// the operation in the debug record of each lost attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if every attempt hit lock contention,
    /// otherwise the first non-contention error from `op`.
    pub fn run_contended<T>(&self, what: &str, mut op: impl FnMut() -> Result<T>) -> Result<T> {
        for attempt in 1..=self.max_attempts {
            match op() {
                Err(err) if err.is_lock_contention() => {
                    log::debug!(
                        "{what} attempt {attempt}/{} timed out on the lock",
                        self.max_attempts
                    );
                    self.pause(attempt);
                }
                result => return result,
            }
        }

        Err(Error::Conflict {
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        )
    }
}
