//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builders that act for a given user and role
//! - Seeding and output-parsing helpers

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host cannot leak in.
const SLOTBOOK_ENV_VARS: &[&str] = &[
    "SLOTBOOK_DATA_DIR",
    "SLOTBOOK_BUSY_TIMEOUT",
    "SLOTBOOK_DISABLE_AUTOINIT",
    "SLOTBOOK_USER",
    "SLOTBOOK_ROLE",
    "SLOTBOOK_LOG_MODE",
    "SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "SLOTBOOK_MAX_ATTEMPTS",
    "SLOTBOOK_RETRY_BACKOFF_MS",
    "SLOTBOOK_OUTPUT_FORMAT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the slotbook data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory path is not created; slotbook creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("slotbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("slotbook").expect("Failed to find slotbook binary");
        for var in SLOTBOOK_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting for `user` in `role`.
    pub fn as_user(&self, user: &str, role: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["--user", user, "--role", role]);
        cmd
    }

    /// A plain `std::process::Command` acting for `user` in `role`, for
    /// spawning concurrent processes.
    pub fn process_as(&self, user: &str, role: &str) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("slotbook"));
        for var in SLOTBOOK_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .args(["--user", user, "--role", role]);
        cmd
    }

    /// A command acting for a provider.
    pub fn as_provider(&self, user: &str) -> Command {
        self.as_user(user, "provider")
    }

    /// A command acting for a requester.
    pub fn as_requester(&self, user: &str) -> Command {
        self.as_user(user, "requester")
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("slotbook.db")
    }

    /// Open `date` for every provider and add `doses` of `item`.
    ///
    /// # Panics
    /// Panics if any of the setup commands fails.
    pub fn seed(&self, date: &str, providers: &[&str], item: &str, doses: u32) {
        for provider in providers {
            self.as_provider(provider)
                .args(["upload-availability", date])
                .assert()
                .success();
        }
        if doses > 0 {
            self.as_provider("seeder")
                .args(["add-doses", item, &doses.to_string()])
                .assert()
                .success();
        }
    }

    /// Book `item` on `date` for `user` and return `(reservation id, provider)`.
    ///
    /// # Panics
    /// Panics if the booking fails.
    pub fn reserve(&self, user: &str, date: &str, item: &str) -> (i64, String) {
        let output = self
            .as_requester(user)
            .args(["reserve", date, item])
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        parse_booking(&String::from_utf8(output.stdout).expect("Invalid UTF-8 in output"))
    }
}

/// Parse `Appointment ID: N, Caregiver username: P`.
///
/// # Panics
/// Panics if the line does not have that shape.
#[allow(dead_code)]
pub fn parse_booking(output: &str) -> (i64, String) {
    let line = output.trim();
    let rest = line
        .strip_prefix("Appointment ID: ")
        .unwrap_or_else(|| panic!("unexpected booking output: {line}"));
    let (id, provider) = rest
        .split_once(", Caregiver username: ")
        .unwrap_or_else(|| panic!("unexpected booking output: {line}"));
    (
        id.parse().expect("reservation id is not a number"),
        provider.to_string(),
    )
}
