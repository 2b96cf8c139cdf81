//! Booking: one slot and one dose, committed together with a reservation.
//!
//! A booking first checks the availability pool and the inventory without
//! touching them, then runs a single IMMEDIATE transaction that takes the
//! smallest open provider, decrements the item and records the reservation.
//! If the transaction finds a resource gone because another caller got there
//! first, everything is rolled back and the decision is made again from the
//! top, up to the policy's attempt limit.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::identity::{Caller, ItemName, Role};
use crate::reservation::Booking;
use crate::SlotDate;

use super::require_role;
use super::retry::RetryPolicy;

/// Options for a booking request.
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// Who is booking. Must act as a requester.
    pub caller: Caller,
    /// The requested date.
    pub date: SlotDate,
    /// The item to consume one dose of.
    pub item: ItemName,
}

impl BookOptions {
    /// Creates booking options.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::operations::BookOptions;
    /// use slotbook::Caller;
    ///
    /// let options = BookOptions::new(
    ///     Caller::requester("alice".parse().unwrap()),
    ///     "06-01-2021".parse().unwrap(),
    ///     "pfizer".parse().unwrap(),
    /// );
    /// assert_eq!(options.item.as_str(), "pfizer");
    /// ```
    #[must_use]
    pub const fn new(caller: Caller, date: SlotDate, item: ItemName) -> Self {
        Self { caller, date, item }
    }
}

/// Whether a failed attempt lost a race and the decision should be redone.
fn lost_race(err: &Error) -> bool {
    matches!(
        err,
        Error::NoProviderAvailable { .. } | Error::InsufficientStock { .. }
    ) || err.is_lock_contention()
}

/// Checks the pool and the inventory without mutating either.
fn precheck(db: &Database, options: &BookOptions) -> Result<()> {
    let conn = db.connection();

    if Database::list_providers(conn, options.date)?.is_empty() {
        return Err(Error::NoProviderAvailable { date: options.date });
    }

    match Database::find_doses(conn, &options.item)? {
        Some(doses) if doses > 0 => Ok(()),
        _ => Err(Error::InsufficientStock {
            item: options.item.to_string(),
        }),
    }
}

fn attempt(db: &mut Database, options: &BookOptions) -> Result<Booking> {
    db.immediate(|tx| {
        let provider = Database::take_provider(tx, options.date)?;
        Database::decrement_doses(tx, &options.item, 1)?;
        let reservation = Database::insert_reservation(
            tx,
            &options.caller.id,
            &provider,
            &options.item,
            options.date,
        )?;

        Ok(Booking {
            reservation_id: reservation.id(),
            provider,
        })
    })
}

/// Books one slot on `options.date` and one dose of `options.item`.
///
/// The provider is the lexicographically smallest one with an open slot.
///
/// # Errors
///
/// - [`Error::NotPermitted`] if the caller is not a requester
/// - [`Error::NoProviderAvailable`] if no slot is open on the date
/// - [`Error::InsufficientStock`] if the item is unknown or has no doses
/// - [`Error::Conflict`] if every attempt lost a race
/// - a persistence error if the database fails
///
/// # Examples
///
/// ```no_run
/// use slotbook::operations::{book, BookOptions, RetryPolicy};
/// use slotbook::{Caller, Database, DatabaseConfig};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// let options = BookOptions::new(
///     Caller::requester("alice".parse().unwrap()),
///     "06-01-2021".parse().unwrap(),
///     "pfizer".parse().unwrap(),
/// );
/// let booking = book(&mut db, &options, &RetryPolicy::default()).unwrap();
/// println!("Appointment ID: {}, Caregiver username: {}", booking.reservation_id, booking.provider);
/// ```
pub fn book(db: &mut Database, options: &BookOptions, policy: &RetryPolicy) -> Result<Booking> {
    require_role(&options.caller, Role::Requester, "reserve")?;

    for attempt_no in 1..=policy.max_attempts {
        precheck(db, options)?;

        match attempt(db, options) {
            Ok(booking) => {
                log::info!(
                    "booked reservation {} for {} with {} on {}",
                    booking.reservation_id,
                    options.caller.id,
                    booking.provider,
                    options.date
                );
                return Ok(booking);
            }
            Err(err) if lost_race(&err) => {
                log::debug!(
                    "booking attempt {attempt_no}/{} for {} lost a race: {err}",
                    policy.max_attempts,
                    options.caller.id
                );
                policy.pause(attempt_no);
            }
            Err(err) => return Err(err),
        }
    }

    log::warn!(
        "booking for {} on {} gave up after {} attempt(s)",
        options.caller.id,
        options.date,
        policy.max_attempts
    );
    Err(Error::Conflict {
        attempts: policy.max_attempts,
    })
}
