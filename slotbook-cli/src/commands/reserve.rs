//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books the first
//! provider with an open slot on a date and takes one dose of an item.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Book an appointment on a date.
#[derive(Args)]
pub struct ReserveCommand {
    /// Date of the appointment (MM-DD-YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Item to take one dose of
    #[arg(value_name = "ITEM")]
    pub item: String,
}

impl ReserveCommand {
    /// Execute the reserve command.
    ///
    /// Prints the reservation id and the assigned provider.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["reserve", &self.date, &self.item])
    }
}
