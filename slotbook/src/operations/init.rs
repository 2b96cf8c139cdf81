//! Explicit data directory and database initialization.
//!
//! [`plan_init`] works out what initialization would do without touching
//! anything; [`init_database`] carries the same plan out. Replacing an
//! existing database reports what its ledgers held, since that state is gone
//! afterwards.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config::CONFIG_FILE_NAME;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for [`plan_init`] and [`init_database`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database, discarding every ledger.
    pub overwrite: bool,
    /// Write a commented `config.yaml` if none exists.
    pub create_config: bool,
}

impl InitOptions {
    /// Options that create the database only, refusing to replace one.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a default configuration file is written.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Row counts of a database that is about to be replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Items in the inventory, including those with no doses left.
    pub items: u64,
    /// Slots published and not booked.
    pub open_slots: u64,
    /// Reservations not cancelled.
    pub reservations: u64,
}

impl LedgerSummary {
    /// Counts the ledgers of the database at `path`.
    ///
    /// `None` if the file cannot be opened as a current slotbook database;
    /// such a file is still replaced, there is just nothing to report.
    fn read(path: &Path) -> Option<Self> {
        let db = match Database::open(DatabaseConfig::new(path).read_only()) {
            Ok(db) => db,
            Err(e) => {
                log::debug!("cannot summarize {}: {e}", path.display());
                return None;
            }
        };
        Self::count(db.connection())
            .map_err(|e| log::debug!("cannot summarize {}: {e}", path.display()))
            .ok()
    }

    fn count(conn: &Connection) -> rusqlite::Result<Self> {
        Ok(Self {
            items: count_rows(conn, "SELECT COUNT(*) FROM items")?,
            open_slots: count_rows(conn, "SELECT COUNT(*) FROM slots")?,
            reservations: count_rows(conn, "SELECT COUNT(*) FROM reservations")?,
        })
    }

    /// Whether every ledger is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items == 0 && self.open_slots == 0 && self.reservations == 0
    }
}

fn count_rows(conn: &Connection, sql: &str) -> rusqlite::Result<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(u64::try_from(n).unwrap_or_default())
}

fn plural(n: u64, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            plural(self.reservations, "reservation"),
            plural(self.open_slots, "open slot"),
            plural(self.items, "item")
        )
    }
}

/// One change initialization makes to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStep {
    /// Create the missing data directory.
    CreateDataDir(PathBuf),
    /// Create an empty database where none exists.
    CreateDatabase(PathBuf),
    /// Remove the database (and its WAL files) and create an empty one.
    ReplaceDatabase {
        /// The database file.
        path: PathBuf,
        /// What the old ledgers held; `None` if the file was unreadable.
        discarded: Option<LedgerSummary>,
    },
    /// Write the commented default `config.yaml`.
    WriteConfig(PathBuf),
    /// A config file was requested but one is already there.
    KeepConfig(PathBuf),
}

impl InitStep {
    /// Past-tense description, for reporting a completed step.
    #[must_use]
    pub fn done(&self) -> String {
        match self {
            Self::CreateDataDir(_) => "Created data directory".to_string(),
            Self::CreateDatabase(_) => "Created database".to_string(),
            Self::ReplaceDatabase {
                discarded: Some(summary),
                ..
            } if !summary.is_empty() => format!("Recreated database (discarded {summary})"),
            Self::ReplaceDatabase { .. } => "Recreated database".to_string(),
            Self::WriteConfig(_) => "Created default configuration file".to_string(),
            Self::KeepConfig(_) => "Configuration file already exists (not overwritten)".to_string(),
        }
    }
}

/// Imperative description, for previewing a step.
impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDataDir(path) => write!(f, "Create data directory: {}", path.display()),
            Self::CreateDatabase(path) => write!(f, "Create database: {}", path.display()),
            Self::ReplaceDatabase { path, discarded } => {
                write!(f, "Replace database: {}", path.display())?;
                match discarded {
                    Some(summary) => write!(f, " (discarding {summary})"),
                    None => write!(f, " (unreadable, contents unknown)"),
                }
            }
            Self::WriteConfig(path) => write!(f, "Create configuration file: {}", path.display()),
            Self::KeepConfig(path) => write!(
                f,
                "Configuration file already exists (will not overwrite): {}",
                path.display()
            ),
        }
    }
}

/// What initializing one data directory involves.
#[derive(Debug, Clone)]
pub struct InitPlan {
    /// The data directory being initialized.
    pub data_dir: PathBuf,
    /// The database file inside it.
    pub database_path: PathBuf,
    /// Changes in the order they are made.
    pub steps: Vec<InitStep>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# slotbook configuration

# Booking attempts before a lost race is reported as a conflict (1-20).
# booking:
#   max_attempts: 3
#   retry_backoff_ms: 10

# Maximum wait for the database write lock, in seconds.
# maximum_lock_wait_seconds: 5

# Refuse to create a missing database on first use.
# disable_autoinit: false

# Output format for listings: table, json or csv.
# output_format: table
";

/// Works out the steps [`init_database`] would take, changing nothing.
///
/// # Errors
///
/// Returns [`Error::Validation`] if a database already exists and
/// `overwrite` is not set.
///
/// # Examples
///
/// ```
/// use slotbook::operations::init::{plan_init, InitOptions, InitStep};
///
/// let dir = std::env::temp_dir().join("slotbook-plan-example-missing");
/// let plan = plan_init(&InitOptions::new(&dir)).unwrap();
/// assert!(matches!(plan.steps[0], InitStep::CreateDataDir(_)));
/// assert!(!dir.exists());
/// ```
pub fn plan_init(options: &InitOptions) -> Result<InitPlan> {
    let data_dir = options.data_dir.clone();
    let database_path = data_dir.join(DATABASE_FILE_NAME);
    let mut steps = Vec::new();

    if !data_dir.exists() {
        steps.push(InitStep::CreateDataDir(data_dir.clone()));
    }

    if !database_path.exists() {
        steps.push(InitStep::CreateDatabase(database_path.clone()));
    } else if options.overwrite {
        steps.push(InitStep::ReplaceDatabase {
            path: database_path.clone(),
            discarded: LedgerSummary::read(&database_path),
        });
    } else {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                database_path.display()
            ),
        });
    }

    if options.create_config {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        steps.push(if config_path.exists() {
            InitStep::KeepConfig(config_path)
        } else {
            InitStep::WriteConfig(config_path)
        });
    }

    Ok(InitPlan {
        data_dir,
        database_path,
        steps,
    })
}

/// Removes a database file together with its WAL side files.
fn remove_database(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(side)?;
        }
    }
    Ok(())
}

/// Creates the data directory and an empty, current-schema database, and
/// returns the plan it carried out.
///
/// # Errors
///
/// Returns an error if the database already exists and `overwrite` is not
/// set, or if a file operation or the schema setup fails.
///
/// # Examples
///
/// ```no_run
/// use slotbook::operations::{init_database, InitOptions};
///
/// let plan = init_database(&InitOptions::new("/tmp/slotbook").with_create_config(true)).unwrap();
/// for step in &plan.steps {
///     println!("{}", step.done());
/// }
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitPlan> {
    let plan = plan_init(options)?;

    for step in &plan.steps {
        match step {
            InitStep::CreateDataDir(path) => fs::create_dir_all(path)?,
            InitStep::CreateDatabase(path) => {
                Database::open(DatabaseConfig::new(path))?;
            }
            InitStep::ReplaceDatabase { path, discarded } => {
                match discarded {
                    Some(summary) => log::warn!(
                        "replacing database at {} and discarding {summary}",
                        path.display()
                    ),
                    None => log::warn!("replacing unreadable database at {}", path.display()),
                }
                remove_database(path)?;
                Database::open(DatabaseConfig::new(path))?;
            }
            InitStep::WriteConfig(path) => fs::write(path, DEFAULT_CONFIG_TEMPLATE)?,
            InitStep::KeepConfig(_) => {}
        }
    }

    log::info!("initialized data directory {}", plan.data_dir.display());
    Ok(plan)
}
