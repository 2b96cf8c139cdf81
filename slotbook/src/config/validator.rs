//! Configuration validation.

use std::ops::RangeInclusive;

use crate::config::schema::{BookingConfig, Config};
use crate::error::{Error, Result};

/// Accepted values for `booking.max_attempts`.
pub const MAX_ATTEMPTS_RANGE: RangeInclusive<u32> = 1..=20;

/// Accepted values for `booking.retry_backoff_ms`.
pub const RETRY_BACKOFF_MS_RANGE: RangeInclusive<u64> = 0..=1000;

/// Accepted values for `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_SECONDS_RANGE: RangeInclusive<u64> = 1..=3600;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use slotbook::config::{BookingConfig, Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let config = Config {
///     booking: Some(BookingConfig { max_attempts: Some(0), retry_backoff_ms: None }),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&config).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first value that is
    /// out of range.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref booking) = config.booking {
            Self::validate_booking(booking)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            Self::check_range("maximum_lock_wait_seconds", timeout, &LOCK_WAIT_SECONDS_RANGE)?;
        }

        Ok(())
    }

    fn validate_booking(booking: &BookingConfig) -> Result<()> {
        if let Some(attempts) = booking.max_attempts {
            Self::check_range("booking.max_attempts", attempts, &MAX_ATTEMPTS_RANGE)?;
        }
        if let Some(backoff) = booking.retry_backoff_ms {
            Self::check_range("booking.retry_backoff_ms", backoff, &RETRY_BACKOFF_MS_RANGE)?;
        }
        Ok(())
    }

    fn check_range<T>(field: &str, value: T, range: &RangeInclusive<T>) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display,
    {
        if range.contains(&value) {
            Ok(())
        } else {
            Err(Error::InvalidConfiguration {
                field: field.into(),
                message: format!(
                    "{value} is out of range (expected {}..={})",
                    range.start(),
                    range.end()
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(max_attempts: Option<u32>, retry_backoff_ms: Option<u64>) -> Config {
        Config {
            booking: Some(BookingConfig {
                max_attempts,
                retry_backoff_ms,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        ConfigValidator::validate(&Config::default()).unwrap();
    }

    #[test]
    fn test_max_attempts_bounds() {
        ConfigValidator::validate(&booking(Some(1), None)).unwrap();
        ConfigValidator::validate(&booking(Some(20), None)).unwrap();
        assert!(ConfigValidator::validate(&booking(Some(0), None)).is_err());

        let err = ConfigValidator::validate(&booking(Some(21), None)).unwrap_err();
        assert!(err.to_string().contains("booking.max_attempts"));
    }

    #[test]
    fn test_retry_backoff_bounds() {
        ConfigValidator::validate(&booking(None, Some(0))).unwrap();
        ConfigValidator::validate(&booking(None, Some(1000))).unwrap();
        assert!(ConfigValidator::validate(&booking(None, Some(1001))).is_err());
    }

    #[test]
    fn test_lock_wait_must_be_positive() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { ref field, .. } if field == "maximum_lock_wait_seconds"));
    }
}
