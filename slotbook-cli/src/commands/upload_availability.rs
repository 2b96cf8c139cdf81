//! Upload-availability command implementation.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Open a slot for the calling provider.
#[derive(Args)]
pub struct UploadAvailabilityCommand {
    /// Date of the slot (MM-DD-YYYY or YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,
}

impl UploadAvailabilityCommand {
    /// Execute the upload-availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["upload_availability", &self.date])
    }
}
