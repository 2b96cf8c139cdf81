//! Configuration system for slotbook.
//!
//! This module provides layered configuration with support for:
//! - a YAML configuration file in the data directory
//! - environment variable overrides
//! - programmatic configuration via the builder
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SLOTBOOK_*`)
//! 3. User config (`~/.slotbook/config.yaml`, or `$SLOTBOOK_DATA_DIR/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use slotbook::config::{Config, ConfigBuilder, OutputFormat};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         output_format: Some(OutputFormat::Json),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_format(), OutputFormat::Json);
//! assert_eq!(config.max_attempts(), 3);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{BookingConfig, Config, OutputFormat};
pub use validator::ConfigValidator;
