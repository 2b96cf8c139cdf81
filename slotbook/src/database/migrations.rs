//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ITEMS_TABLE, CREATE_METADATA_TABLE, CREATE_RESERVATIONS_REQUESTER_INDEX,
    CREATE_RESERVATIONS_TABLE, CREATE_SLOTS_DATE_INDEX, CREATE_SLOTS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Every statement is idempotent, so two connections racing to initialize
/// a fresh file converge on the same schema.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use slotbook::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_ITEMS_TABLE, [])?;
    conn.execute(CREATE_SLOTS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;

    conn.execute(CREATE_SLOTS_DATE_INDEX, [])?;
    conn.execute(CREATE_RESERVATIONS_REQUESTER_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    log::info!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" or a missing metadata table (both mean version 0).
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table" surfaces as the generic SQLITE_ERROR code
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Fails unless the stored schema version equals the current one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] on any mismatch, including an
/// uninitialized database.
pub fn verify_schema_version(conn: &Connection) -> Result<()> {
    let found = get_schema_version(conn)?;
    if found == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        })
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database (version 0) is initialized; any other version must match
/// [`CURRENT_SCHEMA_VERSION`] exactly.
///
/// # Errors
///
/// Returns an error if the schema version is incompatible, initialization
/// fails, or a query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    if get_schema_version(conn)? == 0 {
        initialize_schema(conn)?;
    }
    verify_schema_version(conn)
}
