//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

const MODEL_DIR_VAR: &str = "MEDPREDICT_MODEL_DIR";
const LOG_MODE_VAR: &str = "MEDPREDICT_LOG_MODE";
const LOG_FILE_VAR: &str = "MEDPREDICT_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

impl FromStr for LogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(ConfigError::InvalidLogMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid MEDPREDICT_LOG_MODE {0:?} (expected auto, file or stdout)")]
    InvalidLogMode(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("medpredict.log"),
        }
    }
}

impl AppConfig {
    /// Read the configuration from `MEDPREDICT_*` variables.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable holds an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable holds an unsupported value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            model_dir: non_empty(MODEL_DIR_VAR).map_or(defaults.model_dir, PathBuf::from),
            log_mode: non_empty(LOG_MODE_VAR)
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.log_mode),
            log_file: non_empty(LOG_FILE_VAR).map_or(defaults.log_file, PathBuf::from),
        })
    }
}
