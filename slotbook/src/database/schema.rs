//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices, and metadata
//! statements for the booking ledgers.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the inventory table.
///
/// The `CHECK` constraint backs the conditional decrement: a count can never
/// be written below zero even by a faulty statement.
pub const CREATE_ITEMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS items (
        name TEXT PRIMARY KEY NOT NULL,
        doses INTEGER NOT NULL CHECK (doses >= 0)
    )";

/// SQL statement to create the availability table.
///
/// A row is an open slot; booking deletes it and cancellation restores it.
pub const CREATE_SLOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS slots (
        provider TEXT NOT NULL,
        date TEXT NOT NULL,
        PRIMARY KEY (provider, date)
    )";

/// SQL statement to create the reservations table.
///
/// `AUTOINCREMENT` keeps identifiers monotonic and never reused after a
/// cancellation. The `UNIQUE (provider, date)` constraint rules out two
/// committed reservations for the same slot.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        requester TEXT NOT NULL,
        provider TEXT NOT NULL,
        item TEXT NOT NULL,
        date TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        UNIQUE (provider, date)
    )";

/// Speeds up the per-date pool lookups done by every booking.
pub const CREATE_SLOTS_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_slots_date ON slots(date, provider)";

/// Speeds up `show_appointments` for requesters.
pub const CREATE_RESERVATIONS_REQUESTER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_requester ON reservations(requester)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
