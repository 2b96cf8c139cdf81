//! Show-appointments command implementation.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// List the caller's reservations.
///
/// Requesters see the provider of each reservation; providers see the
/// requester.
#[derive(Args)]
pub struct ShowAppointmentsCommand {}

impl ShowAppointmentsCommand {
    /// Execute the show-appointments command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["show_appointments"])
    }
}
