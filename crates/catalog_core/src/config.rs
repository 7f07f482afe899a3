//! Process configuration read from environment variables.
//!
//! | Variable            | Default                | Meaning                           |
//! |---------------------|------------------------|-----------------------------------|
//! | `CATALOG_STORAGE`   | `sqlite`               | `memory` or `sqlite` backend      |
//! | `CATALOG_DB_PATH`   | `data/app.db`          | SQLite file for the `sqlite` mode |
//! | `CATALOG_LOG_LEVEL` | `default_log_level()`  | `trace..error`                    |
//! | `CATALOG_LOG_DIR`   | unset (no file logs)   | absolute directory for log files  |

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "data/app.db";

/// Which repository backend the process wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" => Some(Self::Memory),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub storage: StorageBackend,
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for environment variable {key}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CatalogConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage = match get("CATALOG_STORAGE") {
            Some(value) => {
                StorageBackend::parse(&value).ok_or(ConfigError::InvalidValue {
                    key: "CATALOG_STORAGE",
                    value,
                })?
            }
            None => StorageBackend::Sqlite,
        };

        let db_path = get("CATALOG_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let log_level = match get("CATALOG_LOG_LEVEL") {
            Some(value) => normalize_level(&value).map_err(|_| ConfigError::InvalidValue {
                key: "CATALOG_LOG_LEVEL",
                value,
            })?,
            None => default_log_level(),
        };

        let log_dir = match get("CATALOG_LOG_DIR").map(PathBuf::from) {
            Some(dir) if !dir.is_absolute() => {
                return Err(ConfigError::InvalidValue {
                    key: "CATALOG_LOG_DIR",
                    value: dir.display().to_string(),
                });
            }
            other => other,
        };

        Ok(Self {
            storage,
            db_path,
            log_level,
            log_dir,
        })
    }
}
