//! Logging infrastructure for the slotbook library.
//!
//! The library only emits records through the [`log`] facade: bookings and
//! cancellations at `info`, lost races and lock waits at `debug`, and
//! compensations that found nothing to restore at `warn`. Front ends install
//! the stderr [`Logger`] defined here to render them.

use std::env;
use std::fmt;
use std::str::FromStr;

use log::{LevelFilter, Log, Metadata, Record};

use crate::error::Error;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "SLOTBOOK_LOG_MODE";

const TARGET_PREFIX: &str = "slotbook";

/// How much of the engine's activity reaches stderr.
///
/// # Examples
///
/// ```
/// use slotbook::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Verbose);
/// assert_eq!("Verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing at all.
    Quiet,
    /// Warnings and errors, such as a no-op slot restore.
    #[default]
    Normal,
    /// Everything down to `debug`, including each retried attempt.
    Verbose,
}

impl LogLevel {
    /// Lower-case name, as accepted by `SLOTBOOK_LOG_MODE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }

    /// The [`log`] filter corresponding to this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }

    /// Picks a level from command-line flags, falling back to `env_value`.
    ///
    /// `verbose` beats `quiet`; flags beat the environment; an unparseable
    /// environment value is ignored.
    #[must_use]
    pub fn resolve(verbose: bool, quiet: bool, env_value: Option<&str>) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            env_value
                .and_then(|value| value.parse().ok())
                .unwrap_or(Self::Normal)
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(Error::Validation {
                field: LOG_MODE_ENV.into(),
                message: format!("expected quiet, normal or verbose, got '{s}'"),
            }),
        }
    }
}

/// Writes slotbook records to stderr as `slotbook[component] LEVEL: message`.
///
/// The component is the last segment of the record's module path, so a lost
/// booking race reads `slotbook[book] DEBUG: ...`. Records from other crates
/// (rusqlite, for one) are dropped.
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// A logger that lets through records at or above `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// The level this logger was built with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the process-wide [`log`] backend.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn format(record: &Record<'_>) -> String {
        let component = record
            .target()
            .rsplit("::")
            .next()
            .filter(|segment| *segment != TARGET_PREFIX);
        match component {
            Some(component) => format!(
                "{TARGET_PREFIX}[{component}] {}: {}",
                record.level(),
                record.args()
            ),
            None => format!("{TARGET_PREFIX} {}: {}", record.level(), record.args()),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter() && metadata.target().starts_with(TARGET_PREFIX)
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Builds the logger for a front end from its `--verbose`/`--quiet` flags
/// and `SLOTBOOK_LOG_MODE`.
///
/// # Examples
///
/// ```
/// use slotbook::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let env_value = env::var(LOG_MODE_ENV).ok();
    Logger::new(LogLevel::resolve(verbose, quiet, env_value.as_deref()))
}
