//! Inventory ledger: a non-negative dose count per item.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::identity::ItemName;
use crate::reservation::ItemStock;

use super::Database;

const SELECT_DOSES: &str = "SELECT doses FROM items WHERE name = ?1";

const DECREMENT_DOSES: &str = r"
    UPDATE items
    SET doses = doses - ?1
    WHERE name = ?2 AND doses >= ?1
";

// No row comes back when the sum would leave the u32 range.
const INCREMENT_DOSES: &str = r"
    INSERT INTO items (name, doses) VALUES (?1, ?2)
    ON CONFLICT(name) DO UPDATE
        SET doses = doses + excluded.doses
        WHERE doses + excluded.doses <= 4294967295
    RETURNING doses
";

const LIST_ITEMS: &str = "SELECT name, doses FROM items ORDER BY name";

impl Database {
    /// Returns the dose count of `item`, or `None` if the item is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_doses(conn: &Connection, item: &ItemName) -> Result<Option<u32>> {
        Ok(conn
            .query_row(SELECT_DOSES, [item.as_str()], |row| row.get(0))
            .optional()?)
    }

    /// Returns the dose count of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the item is unknown.
    pub fn get_doses(conn: &Connection, item: &ItemName) -> Result<u32> {
        Self::find_doses(conn, item)?.ok_or_else(|| Error::NotFound {
            resource: format!("item '{item}'"),
        })
    }

    /// Removes `n` doses of `item` if at least `n` are available.
    ///
    /// The check and the subtraction are one conditional `UPDATE`, so the
    /// count can never go negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientStock`] without mutation if the item is
    /// unknown or holds fewer than `n` doses.
    pub fn decrement_doses(conn: &Connection, item: &ItemName, n: u32) -> Result<()> {
        let rows = conn.execute(DECREMENT_DOSES, params![n, item.as_str()])?;
        if rows == 0 {
            return Err(Error::InsufficientStock {
                item: item.to_string(),
            });
        }
        Ok(())
    }

    /// Adds `n` doses to `item`, creating the item if absent.
    ///
    /// Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `n` is zero or the resulting count
    /// would overflow.
    pub fn increment_doses(conn: &Connection, item: &ItemName, n: u32) -> Result<u32> {
        if n == 0 {
            return Err(Error::Validation {
                field: "count".into(),
                message: "dose count must be positive".into(),
            });
        }

        conn.query_row(INCREMENT_DOSES, params![item.as_str(), n], |row| row.get(0))
            .optional()?
            .ok_or_else(|| Error::Validation {
                field: "count".into(),
                message: format!("adding {n} doses of '{item}' would overflow the stored count"),
            })
    }

    /// Lists every item with its dose count, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_inventory(conn: &Connection) -> Result<Vec<ItemStock>> {
        let mut stmt = conn.prepare(LIST_ITEMS)?;
        let items = stmt
            .query_map([], |row| {
                Ok(ItemStock {
                    item: super::parse_column(row, 0)?,
                    doses: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(items)
    }

    /// Provisions `n` doses of `item` in its own transaction.
    ///
    /// # Errors
    ///
    /// See [`Database::increment_doses`].
    pub fn add_doses(&mut self, item: &ItemName, n: u32) -> Result<u32> {
        let doses = self.immediate(|tx| Self::increment_doses(tx, item, n))?;
        log::info!("'{item}' now has {doses} doses");
        Ok(doses)
    }
}
