//! Reservation ledger: durable record of committed bookings.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::identity::{ItemName, Username};
use crate::reservation::{Reservation, ReservationId};
use crate::SlotDate;

use super::{parse_column, systemtime_to_unix_secs, unix_secs_to_systemtime, Database};

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (requester, provider, item, date, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const SELECT_RESERVATION: &str = r"
    SELECT id, requester, provider, item, date, created_at
    FROM reservations
    WHERE id = ?1
";

const DELETE_RESERVATION: &str = r"
    DELETE FROM reservations
    WHERE id = ?1
    RETURNING id, requester, provider, item, date, created_at
";

const LIST_FOR_REQUESTER: &str = r"
    SELECT id, requester, provider, item, date, created_at
    FROM reservations
    WHERE requester = ?1
    ORDER BY id
";

const LIST_FOR_PROVIDER: &str = r"
    SELECT id, requester, provider, item, date, created_at
    FROM reservations
    WHERE provider = ?1
    ORDER BY id
";

const LIST_ALL: &str = r"
    SELECT id, requester, provider, item, date, created_at
    FROM reservations
    ORDER BY id
";

/// Expects row fields in this order: id, requester, provider, item, date, `created_at`
fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let created_secs: i64 = row.get(5)?;

    Ok(Reservation::builder(
        ReservationId::new(id),
        parse_column(row, 1)?,
        parse_column(row, 2)?,
        parse_column(row, 3)?,
        parse_column(row, 4)?,
    )
    .created_at(unix_secs_to_systemtime(created_secs))
    .build())
}

fn not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}

impl Database {
    /// Records a committed booking and returns it with its new identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the
    /// (provider, date) pair is already reserved.
    pub fn insert_reservation(
        conn: &Connection,
        requester: &Username,
        provider: &Username,
        item: &ItemName,
        date: SlotDate,
    ) -> Result<Reservation> {
        let now = SystemTime::now();
        conn.execute(
            INSERT_RESERVATION,
            params![
                requester.as_str(),
                provider.as_str(),
                item.as_str(),
                date.to_string(),
                systemtime_to_unix_secs(now)?,
            ],
        )?;
        let id = ReservationId::new(conn.last_insert_rowid());

        Ok(Reservation::builder(id, requester.clone(), provider.clone(), item.clone(), date)
            .created_at(now)
            .build())
    }

    /// Retrieves a reservation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such reservation exists.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        conn.query_row(SELECT_RESERVATION, [id.value()], row_to_reservation)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a reservation and returns the row that was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such reservation exists (for example
    /// because a concurrent cancellation removed it first).
    pub fn delete_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        conn.query_row(DELETE_RESERVATION, [id.value()], row_to_reservation)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    /// Lists the reservations held by `requester`, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_requester(
        conn: &Connection,
        requester: &Username,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, LIST_FOR_REQUESTER, Some(requester))
    }

    /// Lists the reservations assigned to `provider`, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_provider(
        conn: &Connection,
        provider: &Username,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, LIST_FOR_PROVIDER, Some(provider))
    }

    /// Lists every reservation, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, LIST_ALL, None)
    }

    fn query_reservations(
        conn: &Connection,
        sql: &str,
        user: Option<&Username>,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = match user {
            Some(user) => stmt.query_map([user.as_str()], row_to_reservation)?,
            None => stmt.query_map([], row_to_reservation)?,
        };
        Ok(rows.collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?)
    }
}
