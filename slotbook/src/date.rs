//! Calendar date of a slot.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Accepted input formats, tried in order.
const INPUT_FORMATS: [&str; 2] = ["%m-%d-%Y", "%Y-%m-%d"];

/// The day a slot is offered on.
///
/// Parsed from `MM-DD-YYYY` or ISO `YYYY-MM-DD`; always displayed and stored
/// in ISO form so that text ordering matches calendar ordering.
///
/// # Examples
///
/// ```
/// use slotbook::SlotDate;
///
/// let a: SlotDate = "06-01-2021".parse().unwrap();
/// let b: SlotDate = "2021-06-01".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "2021-06-01");
///
/// assert!("13-45-2021".parse::<SlotDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotDate(NaiveDate);

impl SlotDate {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn value(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for SlotDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for SlotDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "date".into(),
                message: format!("'{trimmed}' is not a valid date (expected MM-DD-YYYY or YYYY-MM-DD)"),
            })
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
