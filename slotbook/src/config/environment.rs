//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `SLOTBOOK_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use slotbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric count, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("SLOTBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("SLOTBOOK_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(val) = env::var("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("SLOTBOOK_MAX_ATTEMPTS") {
            let attempts = Self::parse_number("SLOTBOOK_MAX_ATTEMPTS", &val)?;
            config.booking.get_or_insert_with(Default::default).max_attempts = Some(attempts);
        }

        if let Ok(val) = env::var("SLOTBOOK_RETRY_BACKOFF_MS") {
            let backoff = Self::parse_number("SLOTBOOK_RETRY_BACKOFF_MS", &val)?;
            config.booking.get_or_insert_with(Default::default).retry_backoff_ms = Some(backoff);
        }

        if let Ok(val) = env::var("SLOTBOOK_OUTPUT_FORMAT") {
            config.output_format = Some(OutputFormat::from_str(&val).map_err(|message| {
                Error::InvalidConfiguration {
                    field: "SLOTBOOK_OUTPUT_FORMAT".into(),
                    message,
                }
            })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::InvalidConfiguration {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::InvalidConfiguration {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}
