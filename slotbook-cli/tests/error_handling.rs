//! Integration tests for error handling and exit codes.
//!
//! These tests verify that slotbook returns the documented exit codes:
//! - Exit code 0: Success
//! - Exit code 1: Business rejection (no stock, no provider, not owner, lock conflict, ...)
//! - Exit code 2: Timeout (SQLite busy)
//! - Exit code 3: No data directory found
//! - Exit code 4: Malformed arguments
//! - Exit code 6: Persistence failure
//! - Exit code 7: Configuration error

mod common;

use common::TestEnv;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;

// ============================================================================
// Success Cases (Exit Code 0)
// ============================================================================

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.seed("06-01-2021", &["dr_a"], "pfizer", 1);

    env.as_requester("alice")
        .args(["reserve", "06-01-2021", "pfizer"])
        .assert()
        .code(0);
    env.as_requester("alice")
        .args(["cancel", "1"])
        .assert()
        .code(0);
}

// ============================================================================
// Business Rejections (Exit Code 1)
// ============================================================================

#[test]
fn test_business_rejections_exit_code() {
    let env = TestEnv::new();
    env.seed("06-01-2021", &["dr_a"], "pfizer", 0);

    // No stock.
    env.as_requester("alice")
        .args(["reserve", "06-01-2021", "pfizer"])
        .assert()
        .code(1);
    // No provider.
    env.as_requester("alice")
        .args(["reserve", "06-02-2021", "pfizer"])
        .assert()
        .code(1);
    // Unknown reservation.
    env.as_requester("alice")
        .args(["cancel", "42"])
        .assert()
        .code(1);
    // Wrong role.
    env.as_requester("alice")
        .args(["upload-availability", "06-01-2021"])
        .assert()
        .code(1);
}

#[test]
fn test_held_lock_ends_in_conflict() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();
    fs::write(
        env.data_dir.join("config.yaml"),
        "booking:\n  max_attempts: 2\n  retry_backoff_ms: 0\n",
    )
    .unwrap();

    let holder = Connection::open(env.database_path()).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE").unwrap();

    env.as_provider("dr_a")
        .args(["--busy-timeout", "1", "add-doses", "pfizer", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gave up after 2 attempt(s)"));
    env.as_provider("dr_a")
        .args(["--busy-timeout", "1", "upload-availability", "06-01-2021"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("conflict"));

    holder.execute_batch("ROLLBACK").unwrap();

    env.as_provider("dr_a")
        .args(["add-doses", "pfizer", "1"])
        .assert()
        .success();
}

// ============================================================================
// No Data Directory (Exit Code 3)
// ============================================================================

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();

    env.as_requester("alice")
        .args(["--disable-autoinit", "show-appointments"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data directory not found"));

    assert!(!env.data_dir.exists());
}

#[test]
fn test_disable_autoinit_from_environment() {
    let env = TestEnv::new();

    env.as_requester("alice")
        .env("SLOTBOOK_DISABLE_AUTOINIT", "true")
        .arg("show-appointments")
        .assert()
        .code(3);
}

#[test]
fn test_disable_autoinit_from_config_file() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "disable_autoinit: true\n").unwrap();

    env.as_requester("alice")
        .arg("show-appointments")
        .assert()
        .code(3);
}

// ============================================================================
// Malformed Arguments (Exit Code 4)
// ============================================================================

#[test]
fn test_missing_identity_exit_code() {
    let env = TestEnv::new();

    env.command()
        .arg("show-appointments")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--user and --role"));

    env.command()
        .args(["--user", "alice", "--role", "admin", "show-appointments"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn test_invalid_identifier_exit_code() {
    let env = TestEnv::new();

    env.as_user("   ", "requester")
        .arg("show-appointments")
        .assert()
        .code(4);
}

#[test]
fn test_malformed_request_exit_code() {
    let env = TestEnv::new();

    env.as_requester("alice")
        .args(["reserve", "tomorrow", "pfizer"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("malformed 'reserve' request"));
}

// ============================================================================
// Persistence Failure (Exit Code 6)
// ============================================================================

#[test]
fn test_incompatible_schema_exit_code() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();

    {
        let conn = Connection::open(env.database_path()).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
    }

    env.as_requester("alice")
        .arg("show-appointments")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("unsupported schema version"));
}

// ============================================================================
// Configuration Error (Exit Code 7)
// ============================================================================

#[test]
fn test_invalid_config_file_exit_code() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(
        env.data_dir.join("config.yaml"),
        "booking:\n  max_attempts: 0\n",
    )
    .unwrap();

    env.as_requester("alice")
        .arg("show-appointments")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("booking.max_attempts"));
}

#[test]
fn test_invalid_env_config_exit_code() {
    let env = TestEnv::new();

    env.as_requester("alice")
        .env("SLOTBOOK_OUTPUT_FORMAT", "xml")
        .arg("show-appointments")
        .assert()
        .code(7);
}
