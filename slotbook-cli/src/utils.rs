//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, and caller
//! resolution.

use crate::error::CliError;
use slotbook::config::OutputFormat;
use slotbook::database::default_data_dir;
use slotbook::{Caller, Config, ConfigBuilder, Database, DatabaseConfig, Role, Username};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // `verbose` is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Name of the calling user.
    pub user: Option<String>,

    /// Role of the calling user, unparsed.
    pub role: Option<String>,

    /// Output format requested on the command line.
    pub format: Option<OutputFormat>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults (lowest priority)
///
/// Command-line flags are applied on top by the callers that use them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the data directory: `--data-dir` / `SLOTBOOK_DATA_DIR`, else `~/.slotbook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref data_dir) => Ok(data_dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Open database with configuration.
///
/// `--disable-autoinit` and `--busy-timeout` override the configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled, either by flag or by configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let mut db_config = DatabaseConfig::for_data_dir(resolve_data_dir(global)?, config);
    if global.disable_autoinit {
        db_config = db_config.no_auto_create();
    }
    if let Some(secs) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(secs.into()));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Build the caller identity from `--user` and `--role`.
pub fn resolve_caller(global: &GlobalOptions) -> Result<Caller, CliError> {
    let (Some(user), Some(role)) = (global.user.as_deref(), global.role.as_deref()) else {
        return Err(CliError::InvalidArguments(
            "no caller identity; pass --user and --role (or set SLOTBOOK_USER and SLOTBOOK_ROLE)"
                .to_string(),
        ));
    };

    let id = user
        .parse::<Username>()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
    let role = role
        .parse::<Role>()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

    Ok(Caller::new(id, role))
}

/// The output format: `--format` wins over configuration.
pub fn output_format(global: &GlobalOptions, config: &Config) -> OutputFormat {
    global.format.unwrap_or_else(|| config.output_format())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
