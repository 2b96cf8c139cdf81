//! Error types for the slotbook library.
//!
//! Every failure the booking engine can report is a variant of [`Error`].
//! Variants are grouped into the coarse [`ErrorKind`] taxonomy that callers
//! use to decide whether to report-and-continue or to end the session.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::identity::Role;
use crate::reservation::ReservationId;
use crate::SlotDate;

/// Result type alias for operations that may fail with a slotbook error.
///
/// # Examples
///
/// ```
/// use slotbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the slotbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A command had the wrong shape (argument count, unparsable argument).
    #[error("malformed '{command}' request: {reason}")]
    MalformedRequest {
        /// The command that was rejected.
        command: String,
        /// Why the request was rejected.
        reason: String,
    },

    /// The operation name is not part of the command surface.
    #[error("unknown operation '{name}'")]
    UnknownOperation {
        /// The unrecognized operation name.
        name: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The item is unknown or has no doses left.
    #[error("not enough available doses of '{item}'")]
    InsufficientStock {
        /// The item that could not be decremented.
        item: String,
    },

    /// No provider has an open slot on the requested date.
    #[error("no provider is available on {date}")]
    NoProviderAvailable {
        /// The requested date.
        date: SlotDate,
    },

    /// The operation lost every race it was retried for.
    #[error("conflict: gave up after {attempts} attempt(s)")]
    Conflict {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The caller is neither the requester nor the provider of a reservation.
    #[error("reservation {reservation} does not belong to '{caller}'")]
    NotOwner {
        /// The reservation that was targeted.
        reservation: ReservationId,
        /// The caller that attempted the operation.
        caller: String,
    },

    /// The caller's role may not perform the operation.
    #[error("'{operation}' requires the {required} role")]
    NotPermitted {
        /// The operation that was attempted.
        operation: String,
        /// The role the operation requires.
        required: Role,
    },

    /// The resource already exists.
    #[error("already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value is out of range or malformed.
    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfiguration {
        /// The configuration key (or environment variable) at fault.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock could not be acquired in time.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of an [`Error`].
///
/// Only [`ErrorKind::PersistenceFailure`] is fatal to a calling session;
/// every other kind is reported and the session continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument shape or an unparsable argument. Nothing was mutated.
    MalformedRequest,
    /// Unknown item or reservation.
    NotFound,
    /// Item unknown or out of doses.
    InsufficientStock,
    /// No open slot on the requested date.
    NoProviderAvailable,
    /// Lost a concurrency race; safe to retry.
    Conflict,
    /// Cancellation attempted by someone other than the requester or provider.
    NotOwner,
    /// The caller's role does not allow the operation.
    NotPermitted,
    /// Duplicate slot publication.
    AlreadyExists,
    /// Invalid configuration values.
    Configuration,
    /// Storage unavailable or inconsistent. The transaction was rolled back.
    PersistenceFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedRequest => "malformed request",
            Self::NotFound => "not found",
            Self::InsufficientStock => "insufficient stock",
            Self::NoProviderAvailable => "no provider available",
            Self::Conflict => "conflict",
            Self::NotOwner => "not owner",
            Self::NotPermitted => "not permitted",
            Self::AlreadyExists => "already exists",
            Self::Configuration => "configuration",
            Self::PersistenceFailure => "persistence failure",
        };
        f.write_str(name)
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the taxonomy bucket this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::{Error, ErrorKind};
    ///
    /// let err = Error::Conflict { attempts: 3 };
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedRequest { .. } | Self::UnknownOperation { .. } | Self::Validation { .. } => {
                ErrorKind::MalformedRequest
            }
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            Self::NoProviderAvailable { .. } => ErrorKind::NoProviderAvailable,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::NotPermitted { .. } => ErrorKind::NotPermitted,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Configuration(_) | Self::InvalidConfiguration { .. } => ErrorKind::Configuration,
            Self::Database(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::DataDirectoryNotFound { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::PersistenceFailure,
        }
    }

    /// Whether this error should end the calling session.
    ///
    /// A lock timeout is a persistence-level error but not fatal: the
    /// database is reachable, just contended.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::PersistenceFailure)
            && !matches!(self, Self::LockTimeout { .. })
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::LockTimeout { .. })
    }

    /// Check if this is a `SQLITE_BUSY`/`SQLITE_LOCKED` failure from the driver.
    #[must_use]
    pub fn is_lock_contention(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            Self::LockTimeout { .. } => true,
            _ => false,
        }
    }

    /// Shorthand for a malformed-request error.
    pub(crate) fn malformed(command: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}
