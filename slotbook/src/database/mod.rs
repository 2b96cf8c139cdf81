//! Database layer for the booking ledgers.
//!
//! This module provides the `SQLite` storage behind the inventory ledger,
//! the availability pool and the reservation ledger, including connection
//! management, schema versioning and the IMMEDIATE transaction helper.
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::database::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
//!
//! let provider = "dr_a".parse().unwrap();
//! let date = "06-01-2021".parse().unwrap();
//! db.upload_availability(&provider, date).unwrap();
//! db.add_doses(&"pfizer".parse().unwrap(), 10).unwrap();
//!
//! let open = Database::list_providers(db.connection(), date).unwrap();
//! assert_eq!(open, vec![provider]);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
