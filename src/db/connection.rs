// src/db/connection.rs
//! Opening SQLite and applying runtime parameters.

use std::path::Path;
use rusqlite::Connection;
use crate::config::ConnectionSettings;

/// Open (or create) the file at `path` and apply the connection pragmas.
///
/// Returns the connection and the journal mode SQLite actually settled on,
/// which can differ from the requested one (e.g. `memory` for `:memory:`).
pub(crate) fn open_db_connection(
    path: &Path,
    settings: &ConnectionSettings,
) -> rusqlite::Result<(Connection, String)> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(settings.busy_timeout)?;
    // journal_mode answers with a row, so it goes through the checked variant.
    let journal: String = conn.pragma_update_and_check(
        None,
        "journal_mode",
        settings.journal_mode.as_str(),
        |row| row.get(0),
    )?;
    conn.pragma_update(None, "synchronous", settings.synchronous.as_str())?;
    Ok((conn, journal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JournalMode, Synchronous};

    #[test]
    fn pragmas_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ConnectionSettings {
            synchronous: Synchronous::Full,
            journal_mode: JournalMode::Wal,
            ..ConnectionSettings::default()
        };
        let (conn, journal) = open_db_connection(&dir.path().join("p.db"), &settings).unwrap();
        assert_eq!(journal.to_lowercase(), "wal");

        // FULL == 2
        let sync: i64 = conn.query_row("PRAGMA synchronous", [], |r| r.get(0)).unwrap();
        assert_eq!(sync, 2);
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();
        assert!(open_db_connection(&path, &ConnectionSettings::default()).is_err());
    }
}
