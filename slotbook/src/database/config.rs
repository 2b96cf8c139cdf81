//! Where the booking database lives and how a connection to it behaves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::schema::DEFAULT_LOCK_WAIT_SECONDS;
use crate::config::Config;
use crate::error::{Error, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SLOTBOOK_DATA_DIR";

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "slotbook.db";

/// Connection parameters for one [`Database`](super::Database).
///
/// Every booking and cancellation takes the write lock up front, so
/// `busy_timeout` is the longest a caller can be kept waiting by another
/// process before the attempt counts as lost.
///
/// # Examples
///
/// ```
/// use slotbook::database::DatabaseConfig;
/// use slotbook::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     maximum_lock_wait_seconds: Some(10),
///     disable_autoinit: Some(true),
///     ..Config::default()
/// };
/// let db = DatabaseConfig::for_data_dir("/tmp/slotbook", &config);
/// assert!(db.path.ends_with("slotbook.db"));
/// assert_eq!(db.busy_timeout, Duration::from_secs(10));
/// assert!(!db.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait for the write lock before giving up.
    pub busy_timeout: Duration,
    /// Create the file (and its directory) when missing.
    pub auto_create: bool,
    /// Open without write access; no booking can run.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// A read-write, auto-creating connection to `path` with the default
    /// lock wait.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(DEFAULT_LOCK_WAIT_SECONDS),
            auto_create: true,
            read_only: false,
        }
    }

    /// The database inside `data_dir`, with the lock wait and auto-init
    /// setting taken from `config`.
    #[must_use]
    pub fn for_data_dir(data_dir: impl AsRef<Path>, config: &Config) -> Self {
        Self {
            path: data_dir.as_ref().join(DATABASE_FILE_NAME),
            busy_timeout: config.lock_wait(),
            auto_create: config.autoinit(),
            read_only: false,
        }
    }

    /// Sets how long to wait for the write lock.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Fail with [`Error::DataDirectoryNotFound`] instead of creating a
    /// missing database.
    #[must_use]
    pub const fn no_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Open for reading only. Implies [`no_auto_create`](Self::no_auto_create).
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.slotbook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".slotbook"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}
