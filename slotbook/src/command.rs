//! The externally visible operations and their argument parsing.
//!
//! A request is a list of whitespace-separated tokens: an operation name
//! followed by exactly the arguments that operation takes. Anything else is
//! rejected before any state is touched.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::identity::{ItemName, Role};
use crate::reservation::{ReservationId, ValidationError};
use crate::SlotDate;

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `reserve <date> <item>`
    Reserve {
        /// Requested date.
        date: SlotDate,
        /// Item to consume one dose of.
        item: ItemName,
    },
    /// `cancel <reservation_id>`
    Cancel {
        /// Reservation to cancel.
        id: ReservationId,
    },
    /// `upload_availability <date>`
    UploadAvailability {
        /// Date the calling provider is free.
        date: SlotDate,
    },
    /// `add_doses <item> <count>`
    AddDoses {
        /// Item to provision.
        item: ItemName,
        /// Doses to add, at least one.
        count: u32,
    },
    /// `search_caregiver_schedule <date>` (alias `search_schedule`)
    SearchSchedule {
        /// Date to look up.
        date: SlotDate,
    },
    /// `show_appointments`
    ShowAppointments,
}

fn argument<T>(command: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = ValidationError>,
{
    raw.parse()
        .map_err(|err: ValidationError| Error::malformed(command, err.to_string()))
}

fn dose_count(command: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(Error::malformed(command, "dose count must be positive")),
        Ok(count) => Ok(count),
        Err(_) => Err(Error::malformed(
            command,
            format!("'{raw}' is not a valid dose count"),
        )),
    }
}

fn expect_args(command: &str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::malformed(
            command,
            format!("expected {expected} argument(s), got {}", args.len()),
        ))
    }
}

impl Command {
    /// Parses a tokenized request.
    ///
    /// The operation name is matched case-insensitively. Argument counts must
    /// match exactly.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedRequest`] for an empty request, a wrong number of
    ///   arguments or an argument that does not parse
    /// - [`Error::UnknownOperation`] for an unrecognized operation name
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::Command;
    ///
    /// let command = Command::parse(&["reserve", "06-01-2021", "Pfizer"]).unwrap();
    /// assert_eq!(command.name(), "reserve");
    ///
    /// assert!(Command::parse(&["reserve", "06-01-2021"]).is_err());
    /// assert!(Command::parse(&["teleport"]).is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let Some((name, rest)) = tokens.split_first() else {
            return Err(Error::malformed("", "empty request"));
        };
        let name = name.as_ref().to_lowercase();
        let args: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

        let command = match name.as_str() {
            "reserve" => {
                expect_args("reserve", &args, 2)?;
                Self::Reserve {
                    date: argument("reserve", args[0])?,
                    item: argument("reserve", args[1])?,
                }
            }
            "cancel" => {
                expect_args("cancel", &args, 1)?;
                Self::Cancel {
                    id: argument("cancel", args[0])?,
                }
            }
            "upload_availability" => {
                expect_args("upload_availability", &args, 1)?;
                Self::UploadAvailability {
                    date: argument("upload_availability", args[0])?,
                }
            }
            "add_doses" => {
                expect_args("add_doses", &args, 2)?;
                Self::AddDoses {
                    item: argument("add_doses", args[0])?,
                    count: dose_count("add_doses", args[1])?,
                }
            }
            "search_caregiver_schedule" | "search_schedule" => {
                expect_args("search_caregiver_schedule", &args, 1)?;
                Self::SearchSchedule {
                    date: argument("search_caregiver_schedule", args[0])?,
                }
            }
            "show_appointments" => {
                expect_args("show_appointments", &args, 0)?;
                Self::ShowAppointments
            }
            _ => return Err(Error::UnknownOperation { name }),
        };

        Ok(command)
    }

    /// Canonical operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reserve { .. } => "reserve",
            Self::Cancel { .. } => "cancel",
            Self::UploadAvailability { .. } => "upload_availability",
            Self::AddDoses { .. } => "add_doses",
            Self::SearchSchedule { .. } => "search_caregiver_schedule",
            Self::ShowAppointments => "show_appointments",
        }
    }

    /// The role the operation requires, or `None` if either role may run it.
    #[must_use]
    pub const fn required_role(&self) -> Option<Role> {
        match self {
            Self::Reserve { .. } => Some(Role::Requester),
            Self::UploadAvailability { .. } | Self::AddDoses { .. } => Some(Role::Provider),
            Self::Cancel { .. } | Self::SearchSchedule { .. } | Self::ShowAppointments => None,
        }
    }

    /// Whether the operation only reads.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::SearchSchedule { .. } | Self::ShowAppointments)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserve { date, item } => write!(f, "reserve {date} {item}"),
            Self::Cancel { id } => write!(f, "cancel {id}"),
            Self::UploadAvailability { date } => write!(f, "upload_availability {date}"),
            Self::AddDoses { item, count } => write!(f, "add_doses {item} {count}"),
            Self::SearchSchedule { date } => write!(f, "search_caregiver_schedule {date}"),
            Self::ShowAppointments => write!(f, "show_appointments"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_reserve() {
        let command = Command::parse(&["RESERVE", "06-01-2021", "Pfizer"]).unwrap();
        assert_eq!(
            command,
            Command::Reserve {
                date: "2021-06-01".parse().unwrap(),
                item: "pfizer".parse().unwrap(),
            }
        );
        assert_eq!(command.required_role(), Some(Role::Requester));
    }

    #[test]
    fn test_parse_every_operation() {
        assert!(matches!(
            Command::parse(&["cancel", "3"]).unwrap(),
            Command::Cancel { id } if id.value() == 3
        ));
        assert!(matches!(
            Command::parse(&["upload_availability", "2021-06-01"]).unwrap(),
            Command::UploadAvailability { .. }
        ));
        assert!(matches!(
            Command::parse(&["add_doses", "moderna", "10"]).unwrap(),
            Command::AddDoses { count: 10, .. }
        ));
        assert_eq!(
            Command::parse(&["show_appointments"]).unwrap(),
            Command::ShowAppointments
        );
    }

    #[test]
    fn test_search_schedule_alias() {
        let long = Command::parse(&["search_caregiver_schedule", "06-01-2021"]).unwrap();
        let short = Command::parse(&["search_schedule", "06-01-2021"]).unwrap();
        assert_eq!(long, short);
        assert!(long.is_read_only());
    }

    #[test]
    fn test_wrong_arity_is_malformed() {
        for tokens in [
            vec!["reserve", "06-01-2021"],
            vec!["reserve", "06-01-2021", "pfizer", "extra"],
            vec!["cancel"],
            vec!["add_doses", "pfizer"],
            vec!["show_appointments", "now"],
        ] {
            let err = Command::parse(&tokens).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedRequest, "{tokens:?}");
        }
    }

    #[test]
    fn test_bad_arguments_are_malformed() {
        let err = Command::parse(&["reserve", "2021/06/01", "pfizer"]).unwrap_err();
        assert!(matches!(err, Error::MalformedRequest { ref command, .. } if command == "reserve"));

        assert!(Command::parse(&["cancel", "abc"]).is_err());
        assert!(Command::parse(&["cancel", "0"]).is_err());
        assert!(Command::parse(&["add_doses", "pfizer", "0"]).is_err());
        assert!(Command::parse(&["add_doses", "pfizer", "-4"]).is_err());
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(matches!(
            Command::parse(&["login_patient", "a", "b"]).unwrap_err(),
            Error::UnknownOperation { ref name } if name == "login_patient"
        ));
        let empty: [&str; 0] = [];
        assert_eq!(
            Command::parse(&empty).unwrap_err().kind(),
            ErrorKind::MalformedRequest
        );
    }

    #[test]
    fn test_display_is_reparseable() {
        let command = Command::parse(&["add_doses", "pfizer", "5"]).unwrap();
        let tokens: Vec<String> = command.to_string().split_whitespace().map(String::from).collect();
        assert_eq!(Command::parse(&tokens).unwrap(), command);
    }
}
