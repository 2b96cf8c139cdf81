//! Availability pool: which provider has an open slot on which date.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::identity::Username;
use crate::SlotDate;

use super::Database;

const LIST_PROVIDERS: &str = "SELECT provider FROM slots WHERE date = ?1 ORDER BY provider";

const TAKE_PROVIDER: &str = r"
    DELETE FROM slots
    WHERE date = ?1
      AND provider = (SELECT MIN(provider) FROM slots WHERE date = ?1)
    RETURNING provider
";

const SLOT_IS_BOOKED: &str =
    "SELECT EXISTS (SELECT 1 FROM reservations WHERE provider = ?1 AND date = ?2)";

const INSERT_SLOT: &str = "INSERT OR IGNORE INTO slots (provider, date) VALUES (?1, ?2)";

const LIST_PROVIDER_DATES: &str = "SELECT date FROM slots WHERE provider = ?1 ORDER BY date";

impl Database {
    /// Lists the providers with an open slot on `date`, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_providers(conn: &Connection, date: SlotDate) -> Result<Vec<Username>> {
        let mut stmt = conn.prepare(LIST_PROVIDERS)?;
        let providers = stmt
            .query_map([date.to_string()], |row| super::parse_column(row, 0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(providers)
    }

    /// Removes and returns the lexicographically smallest provider free on
    /// `date`.
    ///
    /// Must run inside an IMMEDIATE transaction to be race-free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoProviderAvailable`] if the pool for `date` is empty.
    pub fn take_provider(conn: &Connection, date: SlotDate) -> Result<Username> {
        conn.query_row(TAKE_PROVIDER, [date.to_string()], |row| {
            super::parse_column(row, 0)
        })
        .optional()?
        .ok_or(Error::NoProviderAvailable { date })
    }

    /// Opens a slot for `provider` on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the slot is already open or is
    /// currently booked.
    pub fn publish_slot(conn: &Connection, provider: &Username, date: SlotDate) -> Result<()> {
        let booked: bool = conn.query_row(
            SLOT_IS_BOOKED,
            params![provider.as_str(), date.to_string()],
            |row| row.get(0),
        )?;
        if booked {
            return Err(Error::AlreadyExists {
                resource: format!("booked slot for '{provider}' on {date}"),
            });
        }

        let rows = conn.execute(INSERT_SLOT, params![provider.as_str(), date.to_string()])?;
        if rows == 0 {
            return Err(Error::AlreadyExists {
                resource: format!("slot for '{provider}' on {date}"),
            });
        }
        Ok(())
    }

    /// Puts a slot back into the pool after a cancellation.
    ///
    /// Returns `false` if the slot was already present, in which case nothing
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn restore_slot(conn: &Connection, provider: &Username, date: SlotDate) -> Result<bool> {
        let rows = conn.execute(INSERT_SLOT, params![provider.as_str(), date.to_string()])?;
        Ok(rows > 0)
    }

    /// Lists the dates on which `provider` has an open slot, ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_provider_dates(conn: &Connection, provider: &Username) -> Result<Vec<SlotDate>> {
        let mut stmt = conn.prepare(LIST_PROVIDER_DATES)?;
        let dates = stmt
            .query_map([provider.as_str()], |row| super::parse_column(row, 0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(dates)
    }

    /// Publishes a slot in its own transaction.
    ///
    /// # Errors
    ///
    /// See [`Database::publish_slot`].
    pub fn upload_availability(&mut self, provider: &Username, date: SlotDate) -> Result<()> {
        self.immediate(|tx| Self::publish_slot(tx, provider, date))?;
        log::info!("'{provider}' is available on {date}");
        Ok(())
    }
}
