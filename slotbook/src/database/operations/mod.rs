//! Ledger operations on the booking tables.
//!
//! Each ledger is a set of associated functions on [`Database`] that take a
//! `&Connection`, so they compose inside a caller's transaction (a
//! `&Transaction` derefs to a `&Connection`). The few `&mut self` methods
//! open their own IMMEDIATE transaction for standalone use.

mod availability;
mod inventory;
mod ledger;

use std::str::FromStr;
use std::time::{Duration, SystemTime};

use rusqlite::types::Type;
use rusqlite::Row;

use crate::error::{Error, Result};
use crate::reservation::ValidationError;

use super::connection::Database;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Reads a text column and parses it into a validated domain type.
pub(super) fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ValidationError>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl Database {
    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrity check fails or detects corruption.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::SlotDate;

    #[test]
    fn test_timestamp_conversion() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_622_505_600);
        let secs = systemtime_to_unix_secs(now).unwrap();
        assert_eq!(secs, 1_622_505_600);
        assert_eq!(unix_secs_to_systemtime(secs), now);
    }

    #[test]
    fn test_timestamp_before_epoch_rejected() {
        let before = SystemTime::UNIX_EPOCH - Duration::from_secs(1);
        assert!(systemtime_to_unix_secs(before).is_err());
    }

    #[test]
    fn test_parse_column_reports_bad_text() {
        let db = create_test_database();
        let result: rusqlite::Result<SlotDate> =
            db.connection()
                .query_row("SELECT 'not-a-date'", [], |row| parse_column(row, 0));
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
