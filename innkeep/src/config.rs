//! Configuration file loading and merging.
//!
//! The library reads an optional YAML config file (`config.yaml` in the
//! data directory by default) and a small set of `INNKEEP_*` environment
//! variables. Precedence, lowest to highest: built-in defaults, config
//! file, environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::database::{resolve_database_path, DatabaseConfig};
use crate::error::{Error, Result};

/// Top-level configuration schema.
///
/// Every field is optional; unset fields fall back to the built-in
/// defaults when the [`DatabaseConfig`] is produced. Unknown keys are
/// rejected so a typo fails loudly instead of being ignored.
///
/// # Examples
///
/// ```
/// use innkeep::config::Config;
///
/// let config: Config = serde_yaml::from_str("database_path: /srv/innkeep.db\n").unwrap();
/// assert!(config.database_path.is_some());
/// assert!(config.busy_timeout_millis.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the database file. Defaults to the resolved data
    /// directory path when unset.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Busy timeout in milliseconds for lock contention.
    #[serde(default)]
    pub busy_timeout_millis: Option<u64>,

    /// Open the database read-only.
    #[serde(default)]
    pub read_only: Option<bool>,
}

impl Config {
    /// Loads a configuration file, parsing it as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Configuration`] if the YAML is invalid or contains
    /// unknown keys.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Loads configuration from the standard locations.
    ///
    /// Reads `{data_dir}/config.yaml` if it exists (the default data
    /// directory when `data_dir` is `None`), then applies environment
    /// overrides on top. A missing file is not an error; a present but
    /// malformed file is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or
    /// parsed, or if an environment override fails to parse.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let config_path = match data_dir {
            Some(dir) => dir.join("config.yaml"),
            None => crate::database::default_data_dir()?.join("config.yaml"),
        };

        let file_config = if config_path.exists() {
            log::debug!("loading config from {}", config_path.display());
            Self::load_file(&config_path)?
        } else {
            Self::default()
        };

        Ok(file_config.merged_with(&Self::from_env()?))
    }

    /// Reads the environment overrides.
    ///
    /// Recognized variables: `INNKEEP_DATABASE_PATH`,
    /// `INNKEEP_BUSY_TIMEOUT_MS`, `INNKEEP_READ_ONLY` (`1`/`true`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a set variable does not parse.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("INNKEEP_DATABASE_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }
        if let Ok(raw) = std::env::var("INNKEEP_BUSY_TIMEOUT_MS") {
            let millis = raw.parse::<u64>().map_err(|_| Error::Validation {
                field: "INNKEEP_BUSY_TIMEOUT_MS".into(),
                message: format!("not a millisecond count: {raw:?}"),
            })?;
            config.busy_timeout_millis = Some(millis);
        }
        if let Ok(raw) = std::env::var("INNKEEP_READ_ONLY") {
            config.read_only = Some(raw == "1" || raw.eq_ignore_ascii_case("true"));
        }

        Ok(config)
    }

    /// Merges another configuration over this one, field-wise. Set
    /// fields in `other` win.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            database_path: other
                .database_path
                .clone()
                .or_else(|| self.database_path.clone()),
            busy_timeout_millis: other.busy_timeout_millis.or(self.busy_timeout_millis),
            read_only: other.read_only.or(self.read_only),
        }
    }

    /// Produces the database connection settings this configuration
    /// describes, resolving the path if none was given.
    ///
    /// # Errors
    ///
    /// Returns an error if no path was configured and the default data
    /// directory cannot be determined.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => resolve_database_path()?,
        };

        let mut config = DatabaseConfig::new(path);
        if let Some(millis) = self.busy_timeout_millis {
            config = config.with_busy_timeout(Duration::from_millis(millis));
        }
        if self.read_only == Some(true) {
            config = config.read_only();
        }
        Ok(config)
    }
}
