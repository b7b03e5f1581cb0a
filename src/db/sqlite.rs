// src/db/sqlite.rs

use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::config::ConnectionSettings;
use crate::db::connection::open_db_connection;
use crate::db::data::Data;
use crate::db::engine::StorageEngine;
use crate::db::error::{StoreError, StoreResult};
use crate::db::schema::{sync_schema, Synced};

const INSERT_SQL: &str =
    "INSERT INTO buried_data (priority, timestamp, content) VALUES (?1, ?2, ?3)";
const DELETE_SQL: &str = "DELETE FROM buried_data WHERE id = ?1";
const QUERY_SQL: &str = "SELECT id, priority, timestamp, content FROM buried_data \
                         ORDER BY priority DESC, id ASC LIMIT ?1";

/// rusqlite-backed engine owning a single connection.
pub(crate) struct SqliteEngine {
    conn: Connection,
}

/// Result of opening: the engine plus what happened during setup.
pub(crate) struct Opened {
    pub engine: SqliteEngine,
    pub synced: Synced,
    pub journal_mode: String,
}

impl SqliteEngine {
    pub fn open(path: &Path, settings: &ConnectionSettings) -> StoreResult<Opened> {
        let (mut conn, journal_mode) = open_db_connection(path, settings)
            .map_err(|source| StoreError::Init { path: path.to_path_buf(), source })?;
        let synced = sync_schema(&mut conn, path, settings.schema_sync)?;
        Ok(Opened {
            engine: SqliteEngine { conn },
            synced,
            journal_mode,
        })
    }
}

// The column is a signed INTEGER; u64 timestamps are stored bit-for-bit.
fn timestamp_to_sql(ts: u64) -> i64 {
    ts as i64
}

fn timestamp_from_sql(raw: i64) -> u64 {
    raw as u64
}

fn row_to_data(row: &Row<'_>) -> rusqlite::Result<Data> {
    Ok(Data {
        id: row.get(0)?,
        priority: row.get(1)?,
        timestamp: timestamp_from_sql(row.get(2)?),
        content: row.get(3)?,
    })
}

impl StorageEngine for SqliteEngine {
    fn insert(&mut self, data: &Data) -> StoreResult<()> {
        let tx = self.conn.transaction().map_err(StoreError::Write)?;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL).map_err(StoreError::Write)?;
            stmt.execute(params![
                data.priority,
                timestamp_to_sql(data.timestamp),
                data.content,
            ])
            .map_err(StoreError::Write)?;
        }
        tx.commit().map_err(StoreError::Write)
    }

    fn remove(&mut self, id: i64) -> StoreResult<()> {
        self.remove_batch(&[id])
    }

    fn remove_batch(&mut self, ids: &[i64]) -> StoreResult<()> {
        // Dropping `tx` on an early return rolls the whole batch back.
        let tx = self.conn.transaction().map_err(StoreError::Write)?;
        {
            let mut stmt = tx.prepare_cached(DELETE_SQL).map_err(StoreError::Write)?;
            for id in ids {
                stmt.execute([id]).map_err(StoreError::Write)?;
            }
        }
        tx.commit().map_err(StoreError::Write)
    }

    fn query(&self, limit: u32) -> StoreResult<Vec<Data>> {
        let mut stmt = self.conn.prepare_cached(QUERY_SQL).map_err(StoreError::Read)?;
        let rows = stmt
            .query_map([i64::from(limit)], row_to_data)
            .map_err(StoreError::Read)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(StoreError::Read)
    }
}
