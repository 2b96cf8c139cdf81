//! `slotbook init`: create the data directory and an empty database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use slotbook::operations::init::{init_database, plan_init, InitOptions};

/// Initialize slotbook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize slotbook data directory and database")]
pub struct InitCommand {
    /// Replace an existing database, discarding its slots, stock and reservations
    #[arg(long)]
    overwrite: bool,

    /// Also write a commented config.yaml
    #[arg(long)]
    with_config: bool,

    /// Print what would be done and exit
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// The global `--data-dir` names the directory to create here, not one
    /// that must already exist, and `--disable-autoinit` is ignored.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = InitOptions::new(resolve_data_dir(global)?)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);

        if self.dry_run {
            let plan = plan_init(&options)?;
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize slotbook in: {}", plan.data_dir.display());
            for step in &plan.steps {
                println!("  - {step}");
            }
            return Ok(());
        }

        let plan = init_database(&options)?;
        if !global.quiet {
            println!("Initialized slotbook in: {}", plan.data_dir.display());
            for step in &plan.steps {
                println!("  - {}", step.done());
            }
        }
        Ok(())
    }
}
