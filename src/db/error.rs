// src/db/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything a record store operation can fail with.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened, created or read as SQLite.
    #[error("cannot open record store at {}: {source}", path.display())]
    Init {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// `buried_data` exists but does not have the expected columns.
    #[error("incompatible `buried_data` table in {}: {detail}", path.display())]
    IncompatibleSchema { path: PathBuf, detail: String },

    /// A transactional mutation failed and was rolled back.
    #[error("write failed: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("read failed: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// True for failures raised while opening the store.
    pub fn is_init(&self) -> bool {
        matches!(self, StoreError::Init { .. } | StoreError::IncompatibleSchema { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
