//! Configuration loading.
//!
//! Configuration is read from `$XDG_CONFIG_HOME/habit_tracker/config.toml`
//! when present; every field has a default.
//!
//! - Data: `$XDG_DATA_HOME/habit_tracker/` (~/.local/share/habit_tracker/)
//! - Logs: `$XDG_STATE_HOME/habit_tracker/logs/` (~/.local/state/habit_tracker/logs/)

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "habit_tracker";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "habits.sqlite3";

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(fallback))
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Directory holding the habit database.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; defaults by build mode.
    #[serde(default)]
    pub level: Option<String>,
    /// Absolute directory for rolling log files.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> PathBuf {
        xdg_dir("XDG_CONFIG_HOME", ".config")
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Loads from the default location, or defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| xdg_dir("XDG_DATA_HOME", ".local/share").join(APP_DIR_NAME))
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(DB_FILE_NAME)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging.log_dir.clone().unwrap_or_else(|| {
            xdg_dir("XDG_STATE_HOME", ".local/state")
                .join(APP_DIR_NAME)
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.database_path().ends_with("habit_tracker/habits.sqlite3"));
        assert!(config.log_dir().ends_with("habit_tracker/logs"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::parse(
            r#"
data_dir = "/tmp/habits"

[logging]
level = "warn"
log_dir = "/tmp/habit-logs"
"#,
        )
        .unwrap();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/habits/habits.sqlite3")
        );
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/habit-logs"));
    }

    #[test]
    fn missing_file_loads_defaults_and_bad_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Config::load_from(&missing).unwrap().data_dir.is_none());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "data_dir = [").unwrap();
        assert!(matches!(
            Config::load_from(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }
}
