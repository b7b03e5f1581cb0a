// src/bootstrap.rs

//! Working-directory and logger setup.
//!
//! `BuriedPoint::new` prepares `<dir>/buried_point/`, builds a fern dispatch
//! writing to the console and (optionally) to a truncated log file in that
//! directory, and keeps the dispatch as a shared [`Diagnostics`] sink that is
//! handed to every store it opens.
//!
//! Log lines look like:
//! [2025-04-25T16:32:10.123+02:00] [src/db/mod.rs:71] [INFO] [db] Database ready at ...

use chrono::Local;
use fern::Dispatch;
use log::{Level, LevelFilter};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

use crate::config::{ConfigError, DatabaseConfig, LoggingConfig};
use crate::db::{Database, OpenError};
use crate::logging::Diagnostics;
use crate::sink_log;

const WORK_SUBDIR: &str = "buried_point";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot prepare working directory {}: {source}", path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a global logger is already installed")]
    GlobalLogger(#[from] log::SetLoggerError),
}

/// Owner of the working directory and the shared logger.
#[derive(Debug)]
pub struct BuriedPoint {
    work_dir: PathBuf,
    level: LevelFilter,
    logger: Diagnostics,
}

impl BuriedPoint {
    /// Create the working directory and the console/file logger.
    pub fn new(cfg: &LoggingConfig) -> Result<Self, SetupError> {
        Self::build(cfg, true)
    }

    /// Same as [`new`](Self::new) but without the stdout sink.
    pub fn without_console(cfg: &LoggingConfig) -> Result<Self, SetupError> {
        Self::build(cfg, false)
    }

    fn build(cfg: &LoggingConfig, console: bool) -> Result<Self, SetupError> {
        let level = cfg.level_filter()?;
        let work_dir = Path::new(&cfg.dir).join(WORK_SUBDIR);
        fs::create_dir_all(&work_dir).map_err(|source| SetupError::WorkDir {
            path: work_dir.clone(),
            source,
        })?;

        let mut dispatch = Dispatch::new()
            .format(|out, msg, record| {
                out.finish(format_args!(
                    "[{}] [{}:{}] [{}] {}",
                    Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, false),
                    record.file().unwrap_or("?"),
                    record.line().unwrap_or(0),
                    record.level(),
                    msg
                ))
            })
            .level(level);

        if console {
            dispatch = dispatch.chain(std::io::stdout());
        }

        if cfg.enable {
            let log_path = work_dir.join(&cfg.file);
            // Truncate: each run starts a fresh log.
            let file = fs::File::create(&log_path).map_err(|source| SetupError::LogFile {
                path: log_path.clone(),
                source,
            })?;
            dispatch = dispatch.chain(file);
        }

        let (_, sink) = dispatch.into_log();
        let logger = Diagnostics::from_sink(Arc::from(sink));

        sink_log!(
            logger,
            Level::Info,
            "bootstrap",
            "BuriedPoint initialized, working path: {}",
            work_dir.display()
        );

        Ok(BuriedPoint { work_dir, level, logger })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The shared sink; clones refer to the same dispatch.
    pub fn logger(&self) -> Diagnostics {
        self.logger.clone()
    }

    /// Open the store at `<work_dir>/<cfg.path>` with this logger injected.
    pub fn open_database(&self, cfg: &DatabaseConfig) -> Result<Database, OpenError> {
        Database::open_with(self.work_dir.join(&cfg.path), cfg, self.logger())
    }

    /// Route the process-wide `log` macros through the same sink.
    pub fn install_global(&self) -> Result<(), SetupError> {
        log::set_boxed_logger(Box::new(self.logger()))?;
        log::set_max_level(self.level);
        Ok(())
    }
}
