//! Booking operations built on the database ledgers.
//!
//! [`book`] and [`cancel`] are the two multi-ledger operations; each runs
//! as one IMMEDIATE transaction and is retried under a [`RetryPolicy`] when
//! it loses a race. [`Scheduler`] exposes the full command surface over a
//! single connection, and [`init_database`] prepares a data directory.
//!
//! # Examples
//!
//! ```no_run
//! use slotbook::operations::Scheduler;
//! use slotbook::{Caller, Config, Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
//! let mut scheduler = Scheduler::new(db, &Config::default());
//!
//! let caregiver = Caller::provider("dr_a".parse().unwrap());
//! let date = "06-01-2021".parse().unwrap();
//! scheduler.upload_availability(&caregiver, date).unwrap();
//! scheduler.add_doses(&caregiver, &"pfizer".parse().unwrap(), 10).unwrap();
//!
//! let patient = Caller::requester("alice".parse().unwrap());
//! let booking = scheduler.book(&patient, date, "pfizer".parse().unwrap()).unwrap();
//! scheduler.cancel(&patient, booking.reservation_id).unwrap();
//! ```

pub mod book;
pub mod cancel;
pub mod init;
pub mod retry;
pub mod scheduler;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use book::{book, BookOptions};
pub use cancel::cancel;
pub use init::{init_database, plan_init, InitOptions, InitPlan, InitStep, LedgerSummary};
pub use retry::RetryPolicy;
pub use scheduler::{Outcome, Scheduler};

use crate::error::{Error, Result};
use crate::identity::{Caller, Role};

/// Fails with [`Error::NotPermitted`] unless `caller` acts in `role`.
pub(crate) fn require_role(caller: &Caller, role: Role, operation: &str) -> Result<()> {
    if caller.is(role) {
        Ok(())
    } else {
        log::debug!("{caller} may not run '{operation}'");
        Err(Error::NotPermitted {
            operation: operation.into(),
            required: role,
        })
    }
}
