//! The command surface over one database connection.

use serde::Serialize;

use crate::command::Command;
use crate::config::Config;
use crate::database::Database;
use crate::error::Result;
use crate::identity::{Caller, ItemName, Role, Username};
use crate::reservation::{Booking, Reservation, ReservationId, Schedule};
use crate::SlotDate;

use super::book::{book, BookOptions};
use super::cancel::cancel;
use super::require_role;
use super::retry::RetryPolicy;

/// What a successfully executed [`Command`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A reservation was created.
    Booked(Booking),
    /// A reservation was cancelled and its resources returned.
    Cancelled(Reservation),
    /// A provider opened a slot.
    AvailabilityUploaded {
        /// The provider.
        provider: Username,
        /// The date of the new slot.
        date: SlotDate,
    },
    /// An item's dose count changed.
    DosesUpdated {
        /// The item.
        item: ItemName,
        /// The count after the update.
        doses: u32,
    },
    /// The providers free on a date and the current inventory.
    Schedule(Schedule),
    /// The caller's reservations.
    Appointments {
        /// The role the list was built for.
        role: Role,
        /// Reservations ordered by identifier.
        reservations: Vec<Reservation>,
    },
}

/// Runs booking operations against one database.
///
/// The scheduler holds no caller state: every operation takes the
/// [`Caller`] it acts for.
///
/// # Examples
///
/// ```no_run
/// use slotbook::operations::Scheduler;
/// use slotbook::{Caller, Command, Config, Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// let mut scheduler = Scheduler::new(db, &Config::default());
///
/// let caregiver = Caller::provider("dr_a".parse().unwrap());
/// scheduler
///     .execute(&caregiver, Command::parse(&["upload_availability", "06-01-2021"]).unwrap())
///     .unwrap();
/// ```
pub struct Scheduler {
    db: Database,
    policy: RetryPolicy,
}

impl Scheduler {
    /// Creates a scheduler with the retry policy from `config`.
    #[must_use]
    pub fn new(db: Database, config: &Config) -> Self {
        Self::with_policy(db, RetryPolicy::from_config(config))
    }

    /// Creates a scheduler with an explicit retry policy.
    #[must_use]
    pub const fn with_policy(db: Database, policy: RetryPolicy) -> Self {
        Self { db, policy }
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// The retry policy applied to every operation that writes.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Books one slot and one dose. See [`book`](super::book::book).
    ///
    /// # Errors
    ///
    /// Returns the booking engine's error.
    pub fn book(&mut self, caller: &Caller, date: SlotDate, item: ItemName) -> Result<Booking> {
        let options = BookOptions::new(caller.clone(), date, item);
        book(&mut self.db, &options, &self.policy)
    }

    /// Cancels a reservation. See [`cancel`](super::cancel::cancel).
    ///
    /// # Errors
    ///
    /// Returns the cancellation error.
    pub fn cancel(&mut self, caller: &Caller, id: ReservationId) -> Result<Reservation> {
        cancel(&mut self.db, caller, id, &self.policy)
    }

    /// Opens a slot for the calling provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotPermitted`](crate::Error::NotPermitted) for a
    /// requester, [`Error::AlreadyExists`](crate::Error::AlreadyExists) if
    /// the slot is open or booked, or [`Error::Conflict`](crate::Error::Conflict)
    /// if the write lock stayed busy on every attempt.
    pub fn upload_availability(&mut self, caller: &Caller, date: SlotDate) -> Result<()> {
        require_role(caller, Role::Provider, "upload_availability")?;
        self.policy.run_contended("upload_availability", || {
            self.db.upload_availability(&caller.id, date)
        })
    }

    /// Adds doses of `item`, creating it if needed, and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotPermitted`](crate::Error::NotPermitted) for a
    /// requester, a validation error for a zero or overflowing count, or
    /// [`Error::Conflict`](crate::Error::Conflict) if the write lock stayed
    /// busy on every attempt.
    pub fn add_doses(&mut self, caller: &Caller, item: &ItemName, count: u32) -> Result<u32> {
        require_role(caller, Role::Provider, "add_doses")?;
        self.policy.run_contended("add_doses", || self.db.add_doses(item, count))
    }

    /// Lists the providers free on `date` and every item's dose count.
    ///
    /// Both lists come from the same committed state, so a booking that
    /// lands between the two reads is either fully visible or not at all.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn search_schedule(&self, date: SlotDate) -> Result<Schedule> {
        self.db.snapshot(|conn| {
            Ok(Schedule {
                date,
                providers: Database::list_providers(conn, date)?,
                inventory: Database::list_inventory(conn)?,
            })
        })
    }

    /// Lists the caller's reservations: those they hold as a requester, or
    /// those assigned to them as a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn show_appointments(&self, caller: &Caller) -> Result<Vec<Reservation>> {
        let conn = self.db.connection();
        match caller.role {
            Role::Requester => Database::list_reservations_for_requester(conn, &caller.id),
            Role::Provider => Database::list_reservations_for_provider(conn, &caller.id),
        }
    }

    /// Dispatches a parsed command for `caller`.
    ///
    /// # Errors
    ///
    /// Returns the error of the operation the command maps to.
    pub fn execute(&mut self, caller: &Caller, command: Command) -> Result<Outcome> {
        log::debug!("executing '{command}' for {caller}");

        match command {
            Command::Reserve { date, item } => self.book(caller, date, item).map(Outcome::Booked),
            Command::Cancel { id } => self.cancel(caller, id).map(Outcome::Cancelled),
            Command::UploadAvailability { date } => {
                self.upload_availability(caller, date)?;
                Ok(Outcome::AvailabilityUploaded {
                    provider: caller.id.clone(),
                    date,
                })
            }
            Command::AddDoses { item, count } => {
                let doses = self.add_doses(caller, &item, count)?;
                Ok(Outcome::DosesUpdated { item, doses })
            }
            Command::SearchSchedule { date } => self.search_schedule(date).map(Outcome::Schedule),
            Command::ShowAppointments => Ok(Outcome::Appointments {
                role: caller.role,
                reservations: self.show_appointments(caller)?,
            }),
        }
    }
}
