//! Shared database test utilities.

use std::path::{Path, PathBuf};
use std::time::Duration;

use slotbook::database::{Database, DatabaseConfig};
use slotbook::operations::{RetryPolicy, Scheduler};
use tempfile::TempDir;

use super::{date, item, user};

/// A database file in a temporary directory that several connections can
/// open at once.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Creates the directory and the schema.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slotbook.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { _dir: dir, path }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection with a generous busy timeout.
    pub fn open(&self) -> Database {
        Database::open(
            DatabaseConfig::new(&self.path).with_busy_timeout(Duration::from_secs(10)),
        )
        .unwrap()
    }

    /// Opens a new connection wrapped in a scheduler.
    pub fn scheduler(&self, policy: RetryPolicy) -> Scheduler {
        Scheduler::with_policy(self.open(), policy)
    }

    /// Opens slots for `providers` on `raw_date` and provisions `doses` of `item_name`.
    pub fn seed(&self, raw_date: &str, providers: &[&str], item_name: &str, doses: u32) {
        let mut db = self.open();
        for provider in providers {
            db.upload_availability(&user(provider), date(raw_date)).unwrap();
        }
        if doses > 0 {
            db.add_doses(&item(item_name), doses).unwrap();
        }
    }
}
