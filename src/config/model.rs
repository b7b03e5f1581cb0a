// src/config/model.rs

use serde::Deserialize;
use std::{str::FromStr, time::Duration};
use thiserror::Error;

/// Top-level runtime config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)] pub logging:  LoggingConfig,
    #[serde(default)] pub database: DatabaseConfig,
}

/// Mirror of the `[logging]` table
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable")] pub enable: bool,
    #[serde(default = "default_dir")]    pub dir:    String,
    #[serde(default = "default_file")]   pub file:   String,
    #[serde(default = "default_level")]  pub level:  String,
}
fn default_enable() -> bool { true }
fn default_dir() -> String { "logs".into() }
fn default_file() -> String { "buried_point.log".into() }
fn default_level() -> String { "TRACE".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enable: default_enable(),
            dir:    default_dir(),
            file:   default_file(),
            level:  default_level(),
        }
    }
}

impl LoggingConfig {
    /// Parse `level` into a filter; unknown names are rejected.
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        log::LevelFilter::from_str(&self.level)
            .map_err(|_| ConfigError::InvalidLevel(self.level.clone()))
    }
}

/// Mirror of the `[database]` table, stored as raw strings and validated on use
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]      pub path:         String,
    #[serde(default = "default_synchronous")]  pub synchronous:  String,
    #[serde(default = "default_journal_mode")] pub journal_mode: String,
    #[serde(default = "default_busy_timeout")] pub busy_timeout: String,
    #[serde(default = "default_schema_sync")]  pub schema_sync:  String,
}
fn default_db_path() -> String { "buried_point.db".into() }
fn default_synchronous() -> String { "NORMAL".into() }
fn default_journal_mode() -> String { "WAL".into() }
fn default_busy_timeout() -> String { "1s".into() }
fn default_schema_sync() -> String { "strict".into() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path:         default_db_path(),
            synchronous:  default_synchronous(),
            journal_mode: default_journal_mode(),
            busy_timeout: default_busy_timeout(),
            schema_sync:  default_schema_sync(),
        }
    }
}

impl DatabaseConfig {
    /// Validate every string field and produce the typed connection settings.
    pub fn settings(&self) -> Result<ConnectionSettings, ConfigError> {
        let busy_timeout = humantime::parse_duration(&self.busy_timeout)
            .map_err(|e| ConfigError::InvalidDuration(self.busy_timeout.clone(), e))?;
        Ok(ConnectionSettings {
            synchronous:  self.synchronous.parse()?,
            journal_mode: self.journal_mode.parse()?,
            busy_timeout,
            schema_sync:  self.schema_sync.parse()?,
        })
    }
}

/// Fully-typed connection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub synchronous:  Synchronous,
    pub journal_mode: JournalMode,
    pub busy_timeout: Duration,
    pub schema_sync:  SchemaSync,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSettings {
            synchronous:  Synchronous::Normal,
            journal_mode: JournalMode::Wal,
            busy_timeout: Duration::from_millis(1_000),
            schema_sync:  SchemaSync::Strict,
        }
    }
}

/// `PRAGMA synchronous` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synchronous {
    Off,
    Normal,
    Full,
    Extra,
}

impl Synchronous {
    pub fn as_str(self) -> &'static str {
        match self {
            Synchronous::Off    => "OFF",
            Synchronous::Normal => "NORMAL",
            Synchronous::Full   => "FULL",
            Synchronous::Extra  => "EXTRA",
        }
    }
}

/// `PRAGMA journal_mode` values that keep commits atomic across a crash.
/// `MEMORY` and `OFF` are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Wal,
}

impl JournalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            JournalMode::Delete   => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist  => "PERSIST",
            JournalMode::Wal      => "WAL",
        }
    }
}

/// What to do when an existing `buried_data` table has the wrong shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSync {
    /// Refuse to open the store.
    Strict,
    /// Drop the table and create it again. Existing rows are lost.
    Recreate,
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid synchronous mode '{0}'")]
    InvalidSynchronous(String),

    #[error("invalid journal mode '{0}'")]
    InvalidJournalMode(String),

    #[error("invalid schema sync policy '{0}'")]
    InvalidSchemaSync(String),

    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid duration '{0}': {1}")]
    InvalidDuration(String, #[source] humantime::DurationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Allow `"normal"` → `Synchronous::Normal`
impl FromStr for Synchronous {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off"    => Ok(Synchronous::Off),
            "normal" => Ok(Synchronous::Normal),
            "full"   => Ok(Synchronous::Full),
            "extra"  => Ok(Synchronous::Extra),
            other    => Err(ConfigError::InvalidSynchronous(other.into())),
        }
    }
}

impl FromStr for JournalMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delete"   => Ok(JournalMode::Delete),
            "truncate" => Ok(JournalMode::Truncate),
            "persist"  => Ok(JournalMode::Persist),
            "wal"      => Ok(JournalMode::Wal),
            other      => Err(ConfigError::InvalidJournalMode(other.into())),
        }
    }
}

impl FromStr for SchemaSync {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict"   => Ok(SchemaSync::Strict),
            "recreate" => Ok(SchemaSync::Recreate),
            other      => Err(ConfigError::InvalidSchemaSync(other.into())),
        }
    }
}
