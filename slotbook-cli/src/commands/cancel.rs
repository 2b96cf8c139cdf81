//! Cancel command implementation.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Cancel a reservation, returning its slot and dose.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl CancelCommand {
    /// Execute the cancel command.
    ///
    /// Either party to the reservation may cancel it.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["cancel", &self.id])
    }
}
