//! Runtime configuration for hosts embedding the catalog core.
//!
//! # Responsibility
//! - Describe log, storage and paging settings in one serde model.
//! - Load that model from `CATALOG_*` environment variables or JSON.
//!
//! # Invariants
//! - Missing keys fall back to defaults; malformed values are errors.
//! - `default_per_page` is always >= 1.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::search::DEFAULT_PER_PAGE;
use rusqlite::Connection;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_LOG_LEVEL: &str = "CATALOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CATALOG_LOG_DIR";
pub const ENV_DB_PATH: &str = "CATALOG_DB_PATH";
pub const ENV_PER_PAGE: &str = "CATALOG_PER_PAGE";

const MEMORY_DB_MARKER: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where category rows live.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseConfig {
    #[default]
    Memory,
    File { path: PathBuf },
}

impl DatabaseConfig {
    /// Blank values and `:memory:` select the in-memory database.
    pub fn from_path_value(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == MEMORY_DB_MARKER {
            Self::Memory
        } else {
            Self::File {
                path: PathBuf::from(trimmed),
            }
        }
    }

    /// Opens and migrates the configured database.
    pub fn open(&self) -> DbResult<Connection> {
        match self {
            Self::Memory => open_db_in_memory(),
            Self::File { path } => open_db(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub database: DatabaseConfig,
    pub default_per_page: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            database: DatabaseConfig::Memory,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(path) = read(ENV_DB_PATH) {
            config.database = DatabaseConfig::from_path_value(&path);
        }
        if let Some(raw) = read(ENV_PER_PAGE) {
            config.default_per_page = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_PER_PAGE,
                    value: raw.clone(),
                })?;
        }

        config.validated()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validated()
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when no directory is set.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.default_per_page < 1 {
            return Err(ConfigError::InvalidValue {
                key: "default_per_page",
                value: self.default_per_page.to_string(),
            });
        }
        Ok(self)
    }
}
