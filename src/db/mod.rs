// src/db/mod.rs
//! Public façade for the record store.
//!
//! `Database` is the only type callers hold. The SQLite engine sits behind a
//! crate-private `StorageEngine` trait object, so nothing from rusqlite leaks
//! through this API apart from the error sources carried by `StoreError`.
//!
//! The connection and schema helpers are internal:
//!
//! ```compile_fail
//! use buried_point::db::schema::sync_schema;
//! ```
//!
//! ```compile_fail
//! use buried_point::db::connection::open_db_connection;
//! ```

pub mod data;
pub mod error;
mod connection;
mod engine;
mod schema;
mod sqlite;

use log::Level;
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::config::{ConfigError, ConnectionSettings, DatabaseConfig};
use crate::logging::Diagnostics;
use crate::sink_log;
use engine::StorageEngine;
use schema::Synced;
use sqlite::SqliteEngine;

pub use data::Data;
pub use error::{StoreError, StoreResult};

/// Durable, priority-ordered collection of [`Data`] records in one file.
///
/// Mutations take `&mut self`; concurrent writers on one handle must be
/// serialised by the caller (e.g. behind a `Mutex`).
pub struct Database {
    engine: Box<dyn StorageEngine>,
    path: PathBuf,
}

impl Database {
    /// Open or create the store at `path` with default settings and no
    /// diagnostics. Use [`open_with_settings`](Self::open_with_settings) to
    /// inject a sink.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::open_with_settings(path, &ConnectionSettings::default(), Diagnostics::default())
    }

    /// Open using a `[database]` config table. `cfg.path` is not used here;
    /// the caller resolves it against its own working directory.
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        cfg: &DatabaseConfig,
        diagnostics: Diagnostics,
    ) -> Result<Self, OpenError> {
        let settings = cfg.settings()?;
        Ok(Self::open_with_settings(path, &settings, diagnostics)?)
    }

    pub fn open_with_settings<P: AsRef<Path>>(
        path: P,
        settings: &ConnectionSettings,
        diagnostics: Diagnostics,
    ) -> StoreResult<Self> {
        let path = path.as_ref();
        let opened = SqliteEngine::open(path, settings)?;

        let state = match &opened.synced {
            Synced::Created => "schema created".to_string(),
            Synced::Existing => "schema ok".to_string(),
            Synced::Recreated(detail) => {
                sink_log!(diagnostics, Level::Warn, "db", "Dropped incompatible buried_data table ({})", detail);
                "schema recreated".to_string()
            }
        };
        sink_log!(
            diagnostics,
            Level::Info,
            "db",
            "Database ready at {} ({}, journal={})",
            path.display(),
            state,
            opened.journal_mode
        );

        Ok(Database {
            engine: Box::new(opened.engine),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `data` under a freshly assigned id. `data.id` is ignored.
    pub fn insert(&mut self, data: &Data) -> StoreResult<()> {
        self.engine.insert(data)
    }

    /// Delete the row whose id equals `data.id`. Missing ids are not an error.
    pub fn remove(&mut self, data: &Data) -> StoreResult<()> {
        self.engine.remove(data.id)
    }

    /// Delete every row matching an id in `dataset`, all in one transaction.
    pub fn remove_batch(&mut self, dataset: &[Data]) -> StoreResult<()> {
        let ids: Vec<i64> = dataset.iter().map(|d| d.id).collect();
        self.engine.remove_batch(&ids)
    }

    /// Up to `limit` records, highest priority first; equal priorities come
    /// back in insertion order. A negative `limit` is rejected.
    pub fn query(&self, limit: i32) -> StoreResult<Vec<Data>> {
        let limit = u32::try_from(limit).map_err(|_| {
            StoreError::InvalidArgument(format!("query limit must be non-negative, got {limit}"))
        })?;
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.engine.query(limit)
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Failure of [`Database::open_with`]: either the config or the store itself.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
