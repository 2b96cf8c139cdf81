//! Cancellation: reverses a committed booking.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::identity::{Caller, Role};
use crate::reservation::{Reservation, ReservationId};

use super::retry::RetryPolicy;

/// Checks that `caller` may cancel `reservation`.
///
/// A requester may cancel only their own reservations; a provider only the
/// ones assigned to them.
fn authorize(caller: &Caller, reservation: &Reservation) -> Result<()> {
    let owner = match caller.role {
        Role::Requester => reservation.requester(),
        Role::Provider => reservation.provider(),
    };

    if *owner == caller.id {
        Ok(())
    } else {
        Err(Error::NotOwner {
            reservation: reservation.id(),
            caller: caller.id.to_string(),
        })
    }
}

fn attempt(db: &mut Database, id: ReservationId) -> Result<Reservation> {
    db.immediate(|tx| {
        let removed = Database::delete_reservation(tx, id)?;
        Database::increment_doses(tx, removed.item(), 1)?;
        if !Database::restore_slot(tx, removed.provider(), removed.date())? {
            log::warn!(
                "slot for {} on {} was already open while cancelling reservation {id}",
                removed.provider(),
                removed.date()
            );
        }
        Ok(removed)
    })
}

/// Cancels reservation `id` on behalf of `caller`.
///
/// The reservation is removed, one dose of its item is returned to the
/// inventory and the provider's slot is reopened, all in one transaction.
/// Cancelling the same identifier twice yields [`Error::NotFound`].
///
/// # Errors
///
/// - [`Error::NotFound`] if the reservation does not exist (or a concurrent
///   cancellation removed it first)
/// - [`Error::NotOwner`] if the caller is neither its requester nor its provider
/// - [`Error::Conflict`] if the write lock could not be acquired on any attempt
///
/// # Examples
///
/// ```no_run
/// use slotbook::operations::{cancel, RetryPolicy};
/// use slotbook::{Caller, Database, DatabaseConfig, ReservationId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
/// let caller = Caller::requester("alice".parse().unwrap());
/// cancel(&mut db, &caller, ReservationId::new(1), &RetryPolicy::default()).unwrap();
/// ```
pub fn cancel(
    db: &mut Database,
    caller: &Caller,
    id: ReservationId,
    policy: &RetryPolicy,
) -> Result<Reservation> {
    let reservation = Database::get_reservation(db.connection(), id)?;
    authorize(caller, &reservation)?;

    let removed = policy.run_contended("cancel", || attempt(db, id))?;
    log::info!(
        "cancelled reservation {id} ({} with {} on {}) for {caller}",
        removed.requester(),
        removed.provider(),
        removed.date()
    );
    Ok(removed)
}
