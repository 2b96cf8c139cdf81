//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `reserve`: Book the first free provider on a date
//! - `cancel`: Cancel a reservation
//! - `upload_availability`: Open a slot for the calling provider
//! - `add_doses`: Provision inventory
//! - `search_schedule`: Show free providers and inventory for a date
//! - `show_appointments`: List the caller's reservations
//! - `init`: Create the data directory and database
//! - `shell`: Interactive session over stdin
//! - `completions`: Shell completion scripts

pub mod add_doses;
pub mod cancel;
pub mod completions;
pub mod init;
pub mod reserve;
pub mod search_schedule;
pub mod shell;
pub mod show_appointments;
pub mod upload_availability;

pub use add_doses::AddDosesCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use reserve::ReserveCommand;
pub use search_schedule::SearchScheduleCommand;
pub use shell::ShellCommand;
pub use show_appointments::ShowAppointmentsCommand;
pub use upload_availability::UploadAvailabilityCommand;

use crate::error::CliError;
use crate::output::write_outcome;
use crate::utils::{
    load_configuration, open_database, output_format, resolve_caller, GlobalOptions,
};
use slotbook::{Command, Scheduler};

/// Parse `tokens` as one request, run it for the configured caller, and
/// print the outcome.
///
/// The request is parsed before the database is opened, so a malformed
/// request never touches storage.
pub(crate) fn run_request(global: &GlobalOptions, tokens: &[&str]) -> Result<(), CliError> {
    let command = Command::parse(tokens)?;
    let caller = resolve_caller(global)?;
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;

    let mut scheduler = Scheduler::new(db, &config);
    let outcome = scheduler.execute(&caller, command)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_outcome(&mut handle, &outcome, output_format(global, &config))
}
