//! Add-doses command implementation.
//!
//! Unknown items are created with the given count; known items have the
//! count added to their stock.

use super::run_request;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Add doses of an item to the inventory.
#[derive(Args)]
pub struct AddDosesCommand {
    /// Item name
    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Number of doses to add (positive)
    #[arg(value_name = "COUNT")]
    pub count: String,
}

impl AddDosesCommand {
    /// Execute the add-doses command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run_request(global, &["add_doses", &self.item, &self.count])
    }
}
