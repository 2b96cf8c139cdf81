//! Configuration builder combining all sources.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::database::DATA_DIR_ENV;
use crate::error::Result;

/// Builds the effective configuration.
///
/// Sources are applied from lowest to highest precedence: built-in
/// defaults, the data directory's `config.yaml`, `SLOTBOOK_*` environment
/// variables and finally programmatic overrides. The result is validated
/// before it is returned.
///
/// # Examples
///
/// ```
/// use slotbook::config::{BookingConfig, Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         booking: Some(BookingConfig { max_attempts: Some(8), retry_backoff_ms: None }),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_attempts(), 8);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Create a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `config.yaml` from `dir` instead of the default data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Do not read configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply environment variable overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Add a programmatic override with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Load, merge and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed, an
    /// environment variable holds an invalid value, or the merged result
    /// fails validation.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();

        if !self.skip_files {
            let data_dir = self
                .data_dir
                .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from));
            if let Some(source) = ConfigLoader::load_user_config(data_dir.as_deref())? {
                sources.push(source);
            }
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{BookingConfig, OutputFormat};
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_then_override() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "booking:\n  max_attempts: 4\n  retry_backoff_ms: 20\noutput_format: csv\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .skip_env()
            .with_config(Config {
                booking: Some(BookingConfig {
                    max_attempts: Some(9),
                    retry_backoff_ms: None,
                }),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.max_attempts(), 9);
        assert_eq!(config.retry_backoff().as_millis(), 20);
        assert_eq!(config.output_format(), OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "maximum_lock_wait_seconds: 3\n").unwrap();
        std::env::set_var("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "11");

        let result = ConfigBuilder::new().with_data_dir(dir.path()).build();
        std::env::remove_var("SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS");

        assert_eq!(result.unwrap().maximum_lock_wait_seconds, Some(11));
    }
}
