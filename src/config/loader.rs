// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads the TOML config file and deserializes it into `Config`.
//! Every table and key is optional; missing ones fall back to defaults.

use crate::config::model::{Config, ConfigError};
use std::{fs, path::Path};

/// Load and parse the configuration from `path`.
/// Logs at DEBUG before reading and INFO on success.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Reading config from {:?}", path);
    let txt = fs::read_to_string(path)?;
    let cfg = parse(&txt)?;
    log::info!("Loaded config from {:?}", path);
    Ok(cfg)
}

/// Parse and validate a configuration held in memory.
pub fn parse(txt: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(txt)?;
    // Surface bad enum strings and durations at load time, not at first use.
    cfg.logging.level_filter()?;
    cfg.database.settings()?;
    Ok(cfg)
}

/// Like [`load`], but a missing file yields `Config::default()`.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load(path)
    } else {
        log::debug!("No config at {:?}, using defaults", path);
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_bad_synchronous() {
        let err = parse("[database]\nsynchronous = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSynchronous(_)));
    }

    #[test]
    fn parse_rejects_journal_modes_without_crash_safety() {
        for mode in ["off", "OFF", "memory", "Memory"] {
            let err = parse(&format!("[database]\njournal_mode = \"{mode}\"\n")).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidJournalMode(_)), "{mode}: {err}");
        }
        for mode in ["delete", "truncate", "persist", "wal"] {
            assert!(parse(&format!("[database]\njournal_mode = \"{mode}\"\n")).is_ok(), "{mode}");
        }
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        assert!(matches!(parse("[database"), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(cfg.database.path, "buried_point.db");
    }

    #[test]
    fn missing_file_is_an_io_error_for_load() {
        assert!(matches!(load(Path::new("definitely/not/here.toml")), Err(ConfigError::Io(_))));
    }
}
