//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddDosesCommand, CancelCommand, CompletionsCommand, InitCommand, ReserveCommand,
    SearchScheduleCommand, ShellCommand, ShowAppointmentsCommand, UploadAvailabilityCommand,
};
use clap::{Parser, Subcommand};
use slotbook::config::OutputFormat;
use std::path::PathBuf;

/// Command-line tool for publishing availability and booking slots.
#[derive(Parser)]
#[command(name = "slotbook")]
#[command(version, about = "Book provider slots against a dose inventory", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SLOTBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SLOTBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "SLOTBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Name of the user the command acts for
    #[arg(long, value_name = "NAME", global = true, env = "SLOTBOOK_USER")]
    pub user: Option<String>,

    /// Role the user acts in (requester or provider)
    #[arg(long, value_name = "ROLE", global = true, env = "SLOTBOOK_ROLE")]
    pub role: Option<String>,

    /// Output format (table, json, csv)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Book the first free provider on a date and take one dose
    Reserve(ReserveCommand),

    /// Cancel a reservation and return its slot and dose
    Cancel(CancelCommand),

    /// Open a slot for the calling provider on a date
    UploadAvailability(UploadAvailabilityCommand),

    /// Add doses of an item to the inventory
    AddDoses(AddDosesCommand),

    /// Show free providers on a date and the current inventory
    #[command(alias = "search-caregiver-schedule")]
    SearchSchedule(SearchScheduleCommand),

    /// List the caller's reservations
    ShowAppointments(ShowAppointmentsCommand),

    /// Initialize slotbook data directory and database
    Init(InitCommand),

    /// Run an interactive session reading commands from stdin
    Shell(ShellCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
