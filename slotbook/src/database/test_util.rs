//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::identity::{ItemName, Username};
use crate::SlotDate;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Seeds open slots for each provider on `date` and `doses` of `item`.
///
/// # Panics
///
/// Panics if any name or date fails to parse or a write fails.
pub fn seed(db: &mut Database, date: &str, providers: &[&str], item: &str, doses: u32) {
    let date: SlotDate = date.parse().unwrap();
    for provider in providers {
        let provider: Username = provider.parse().unwrap();
        db.upload_availability(&provider, date).unwrap();
    }
    if doses > 0 {
        let item: ItemName = item.parse().unwrap();
        db.add_doses(&item, doses).unwrap();
    }
}
