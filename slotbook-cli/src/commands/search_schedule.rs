//! Search-schedule command implementation.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Show the providers free on a date and every item's dose count.
#[derive(Args)]
pub struct SearchScheduleCommand {
    /// Date to search (MM-DD-YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,
}

impl SearchScheduleCommand {
    /// Execute the search-schedule command.
    ///
    /// This is read-only.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["search_caregiver_schedule", &self.date])
    }
}
