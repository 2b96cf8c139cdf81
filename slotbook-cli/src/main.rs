//! Main entry point for the slotbook CLI.
//!
//! This is the command-line interface for the slotbook booking engine.
//! It provides one subcommand per request:
//! - `reserve`: Book the first free provider on a date
//! - `cancel`: Cancel a reservation
//! - `upload-availability`: Open a slot for the calling provider
//! - `add-doses`: Provision inventory
//! - `search-schedule`: Show free providers and inventory for a date
//! - `show-appointments`: List the caller's reservations
//!
//! plus `init`, `shell` and `completions`.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // A second install only fails if a logger already exists.
    let _ = slotbook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        user: cli.user,
        role: cli.role,
        format: cli.format,
    };

    let result = match cli.command {
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::UploadAvailability(cmd) => cmd.execute(&global),
        cli::Command::AddDoses(cmd) => cmd.execute(&global),
        cli::Command::SearchSchedule(cmd) => cmd.execute(&global),
        cli::Command::ShowAppointments(cmd) => cmd.execute(&global),
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Shell(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
