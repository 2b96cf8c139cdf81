#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # slotbook
//!
//! A library for booking single-use provider slots together with one unit
//! of a shared, finite inventory.
//!
//! Providers publish the dates they are free on and provision item stock;
//! requesters book one slot and one dose as a single indivisible operation,
//! and may later cancel it, which returns both. Concurrent callers each hold
//! their own [`Database`] connection to a shared `SQLite` file; every
//! multi-ledger change runs under one write-locked transaction.
//!
//! ## Core Types
//!
//! - [`Caller`], [`Username`], [`ItemName`], [`Role`]: who is acting, on what
//! - [`SlotDate`]: a calendar date accepted as `MM-DD-YYYY` or `YYYY-MM-DD`
//! - [`Reservation`], [`ReservationId`], [`Booking`], [`Schedule`]: ledger records
//! - [`Command`] and [`operations::Scheduler`]: the command surface
//! - [`Error`], [`ErrorKind`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use slotbook::{Caller, Command, SlotDate};
//!
//! let date: SlotDate = "06-01-2021".parse().unwrap();
//! assert_eq!(date.to_string(), "2021-06-01");
//!
//! let command = Command::parse(&["reserve", "06-01-2021", "pfizer"]).unwrap();
//! assert_eq!(command.name(), "reserve");
//!
//! let caller = Caller::requester("Alice".parse().unwrap());
//! assert_eq!(caller.id.as_str(), "alice");
//! ```

pub mod command;
pub mod config;
pub mod database;
pub mod date;
pub mod error;
pub mod identity;
pub mod logging;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use command::Command;
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use date::SlotDate;
pub use error::{Error, ErrorKind, Result};
pub use identity::{Caller, ItemName, Role, Username};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{Outcome, RetryPolicy, Scheduler};
pub use reservation::{Booking, ItemStock, Reservation, ReservationId, Schedule};
