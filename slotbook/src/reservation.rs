//! Reservation types for tracking committed bookings.
//!
//! This module provides the reservation record itself, its identifier, and
//! the small value types returned by booking and schedule queries.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::identity::{ItemName, Username};
use crate::SlotDate;

/// A unique, monotonically assigned reservation identifier.
///
/// Identifiers are assigned by the reservation ledger and never reused, even
/// after the reservation is cancelled.
///
/// # Examples
///
/// ```
/// use slotbook::ReservationId;
///
/// let id: ReservationId = "42".parse().unwrap();
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
///
/// assert!("abc".parse::<ReservationId>().is_err());
/// assert!("0".parse::<ReservationId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(ValidationError {
                field: "reservation_id".into(),
                message: format!("'{trimmed}' is not a positive integer"),
            }),
        }
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed booking: one slot plus one dose, held by one requester.
///
/// Reservations are created using the builder pattern.
///
/// # Examples
///
/// ```
/// use slotbook::{Reservation, ReservationId};
///
/// let reservation = Reservation::builder(
///     ReservationId::new(1),
///     "alice".parse().unwrap(),
///     "dr_a".parse().unwrap(),
///     "pfizer".parse().unwrap(),
///     "06-01-2021".parse().unwrap(),
/// )
/// .build();
///
/// assert_eq!(reservation.provider().as_str(), "dr_a");
/// assert_eq!(reservation.date().to_string(), "2021-06-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    requester: Username,
    provider: Username,
    item: ItemName,
    date: SlotDate,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub const fn builder(
        id: ReservationId,
        requester: Username,
        provider: Username,
        item: ItemName,
        date: SlotDate,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            requester,
            provider,
            item,
            date,
            created_at: None,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the requester holding the reservation.
    #[must_use]
    pub const fn requester(&self) -> &Username {
        &self.requester
    }

    /// Returns the provider whose slot was consumed.
    #[must_use]
    pub const fn provider(&self) -> &Username {
        &self.provider
    }

    /// Returns the item a dose was taken from.
    #[must_use]
    pub const fn item(&self) -> &ItemName {
        &self.item
    }

    /// Returns the slot date.
    #[must_use]
    pub const fn date(&self) -> SlotDate {
        self.date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Whether the given user is the requester or the provider.
    #[must_use]
    pub fn involves(&self, user: &Username) -> bool {
        &self.requester == user || &self.provider == user
    }
}

/// Builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    requester: Username,
    provider: Username,
    item: ItemName,
    date: SlotDate,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the creation timestamp. Defaults to now.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    #[must_use]
    pub fn build(self) -> Reservation {
        Reservation {
            id: self.id,
            requester: self.requester,
            provider: self.provider,
            item: self.item,
            date: self.date,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        }
    }
}

/// The result of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The identifier of the new reservation.
    pub reservation_id: ReservationId,
    /// The provider assigned to the requester.
    pub provider: Username,
}

/// The dose count of one inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStock {
    /// The item.
    pub item: ItemName,
    /// Doses currently available.
    pub doses: u32,
}

/// Read-only view of one date: who is free, and what is in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The date that was queried.
    pub date: SlotDate,
    /// Providers with an open slot on `date`, ascending.
    pub providers: Vec<Username>,
    /// Every item and its dose count, ordered by name.
    pub inventory: Vec<ItemStock>,
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
