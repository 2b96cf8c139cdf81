//! Build script for slotbook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("slotbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book provider slots against a dose inventory")
        .long_about(
            "Command-line tool for publishing provider availability, provisioning doses, \
             and booking appointments",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SLOTBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SLOTBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("SLOTBOOK_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("Name of the user the command acts for")
                .value_name("NAME")
                .global(true)
                .env("SLOTBOOK_USER"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role the user acts in (requester or provider)")
                .value_name("ROLE")
                .global(true)
                .env("SLOTBOOK_ROLE"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (table, json, csv)")
                .value_name("FORMAT")
                .global(true),
        )
        .subcommands(vec![
            Command::new("reserve")
                .about("Book the first free provider on a date and take one dose")
                .long_about(
                    "Book the lexicographically first provider with an open slot on DATE \
                     and take one dose of ITEM",
                ),
            Command::new("cancel")
                .about("Cancel a reservation and return its slot and dose")
                .long_about("Cancel a reservation; either its requester or its provider may cancel"),
            Command::new("upload-availability")
                .about("Open a slot for the calling provider on a date")
                .long_about("Publish the calling provider as available on DATE"),
            Command::new("add-doses")
                .about("Add doses of an item to the inventory")
                .long_about("Create ITEM with COUNT doses, or add COUNT to its stock"),
            Command::new("search-schedule")
                .about("Show free providers on a date and the current inventory")
                .long_about("List providers with an open slot on DATE and every item's dose count"),
            Command::new("show-appointments")
                .about("List the caller's reservations")
                .long_about("List reservations where the caller is the requester or the provider"),
            Command::new("init")
                .about("Initialize slotbook data directory and database")
                .long_about(
                    "Create the data directory and an empty database. --dry-run lists the steps; \
                     --overwrite reports how many reservations, open slots and items are discarded",
                ),
            Command::new("shell")
                .about("Run an interactive session reading commands from stdin")
                .long_about("Read one request per line and answer in short messages until quit"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("slotbook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
