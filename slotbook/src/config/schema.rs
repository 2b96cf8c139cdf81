//! Configuration schema definitions.
//!
//! This module defines the configuration structure for slotbook: booking
//! retry behavior, lock waits, initialization and output settings.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of booking attempts before reporting a conflict.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base backoff between booking attempts, in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 10;

/// Default maximum wait for the database write lock, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; the accessor
/// methods fill in defaults.
///
/// # Examples
///
/// ```
/// use slotbook::config::{BookingConfig, Config};
///
/// let config = Config {
///     booking: Some(BookingConfig {
///         max_attempts: Some(5),
///         retry_backoff_ms: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.max_attempts(), 5);
/// assert_eq!(config.retry_backoff().as_millis(), 10);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Booking retry settings.
    pub booking: Option<BookingConfig>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for listing commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Number of booking attempts before giving up with a conflict.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.max_attempts)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Base delay between booking attempts.
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(
            self.booking
                .as_ref()
                .and_then(|b| b.retry_backoff_ms)
                .unwrap_or(DEFAULT_RETRY_BACKOFF_MS),
        )
    }

    /// Maximum wait for the database write lock.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether a missing database may be created on first use.
    #[must_use]
    pub fn autoinit(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// Output format for listing commands.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Booking retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Attempts before a lost race is reported as a conflict (1..=20).
    pub max_attempts: Option<u32>,

    /// Base backoff in milliseconds, multiplied by the attempt number (0..=1000).
    pub retry_backoff_ms: Option<u64>,
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use slotbook::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("invalid output format '{other}' (expected table, json or csv)")),
        }
    }
}
