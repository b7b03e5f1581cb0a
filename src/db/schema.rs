// src/db/schema.rs
//! Schema check and creation for the `buried_data` table.
//!
//! There are no migrations: on open the table is either created, accepted
//! as-is when it has exactly the expected shape, or (depending on the
//! configured `SchemaSync`) rejected or dropped and recreated.

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::config::SchemaSync;
use crate::db::error::{StoreError, StoreResult};

pub(crate) const TABLE: &str = "buried_data";

const SCHEMA: &str = include_str!("../../resources/schema.sql");

/// (name, declared type, primary key) in column order.
const EXPECTED_COLUMNS: [(&str, &str, bool); 4] = [
    ("id",        "INTEGER", true),
    ("priority",  "INTEGER", false),
    ("timestamp", "INTEGER", false),
    ("content",   "TEXT",    false),
];

/// What `inspect` found in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TableState {
    Missing,
    Compatible,
    Incompatible(String),
}

/// What `sync_schema` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Synced {
    Created,
    Existing,
    Recreated(String),
}

#[derive(Debug)]
struct ColumnInfo {
    name: String,
    decl_type: String,
    pk: bool,
}

/// Compare the on-disk `buried_data` table with the expected layout.
pub(crate) fn inspect(conn: &Connection) -> rusqlite::Result<TableState> {
    let create_sql: Option<Option<String>> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE],
            |row| row.get(0),
        )
        .optional()?;
    let Some(create_sql) = create_sql else {
        return Ok(TableState::Missing);
    };

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TABLE})"))?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                decl_type: row.get(2)?,
                pk: row.get::<_, i64>(5)? != 0,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(compare(&columns, create_sql.as_deref().unwrap_or_default()))
}

fn compare(columns: &[ColumnInfo], create_sql: &str) -> TableState {
    if columns.len() != EXPECTED_COLUMNS.len() {
        return TableState::Incompatible(format!(
            "expected {} columns, found {}",
            EXPECTED_COLUMNS.len(),
            columns.len()
        ));
    }
    for (col, (name, decl_type, pk)) in columns.iter().zip(EXPECTED_COLUMNS) {
        if col.name != name {
            return TableState::Incompatible(format!(
                "expected column `{name}`, found `{}`",
                col.name
            ));
        }
        if !col.decl_type.eq_ignore_ascii_case(decl_type) {
            return TableState::Incompatible(format!(
                "column `{name}` has type `{}`, expected `{decl_type}`",
                col.decl_type
            ));
        }
        if col.pk != pk {
            return TableState::Incompatible(format!("primary key mismatch on `{name}`"));
        }
    }
    // Without AUTOINCREMENT SQLite may hand out the id of a deleted row again.
    if !id_is_autoincrement(create_sql) {
        return TableState::Incompatible("`id` is not AUTOINCREMENT".into());
    }
    TableState::Compatible
}

/// True when the `id` column definition itself reads
/// `id INTEGER PRIMARY KEY [ASC|DESC] AUTOINCREMENT`.
fn id_is_autoincrement(create_sql: &str) -> bool {
    let tokens = tokenize(create_sql);
    tokens.iter().enumerate().any(|(i, tok)| {
        if tok != "ID" || i == 0 || !matches!(tokens[i - 1].as_str(), "(" | ",") {
            return false;
        }
        let mut rest = tokens[i + 1..].iter().map(String::as_str);
        if !(rest.next() == Some("INTEGER")
            && rest.next() == Some("PRIMARY")
            && rest.next() == Some("KEY"))
        {
            return false;
        }
        match rest.next() {
            Some("ASC" | "DESC") => rest.next() == Some("AUTOINCREMENT"),
            next => next == Some("AUTOINCREMENT"),
        }
    })
}

/// Split DDL into upper-cased words and punctuation. Comments are dropped,
/// string literals collapse to a single `'` token, quoted identifiers are
/// unquoted.
fn tokenize(sql: &str) -> Vec<String> {
    let chars: Vec<char> = sql.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '-' if chars.get(i + 1) == Some(&'-') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            '\'' | '"' | '`' | '[' => {
                let close = if c == '[' { ']' } else { c };
                let start = i + 1;
                i = start;
                while i < chars.len() && chars[i] != close {
                    i += 1;
                }
                if c == '\'' {
                    tokens.push("'".to_string());
                } else {
                    tokens.push(chars[start..i.min(chars.len())].iter().collect::<String>().to_ascii_uppercase());
                }
                i += 1;
            }
            c if c.is_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(chars[start..i].iter().collect::<String>().to_ascii_uppercase());
            }
            c if c.is_whitespace() => i += 1,
            c => {
                tokens.push(c.to_string());
                i += 1;
            }
        }
    }
    tokens
}

/// Make the file converge to the expected schema, per `policy`.
pub(crate) fn sync_schema(conn: &mut Connection, path: &Path, policy: SchemaSync) -> StoreResult<Synced> {
    let init = |source: rusqlite::Error| StoreError::Init { path: path.to_path_buf(), source };

    match inspect(conn).map_err(init)? {
        TableState::Compatible => Ok(Synced::Existing),
        TableState::Missing => {
            conn.execute_batch(SCHEMA).map_err(init)?;
            Ok(Synced::Created)
        }
        TableState::Incompatible(detail) => match policy {
            SchemaSync::Strict => Err(StoreError::IncompatibleSchema {
                path: path.to_path_buf(),
                detail,
            }),
            SchemaSync::Recreate => {
                let tx = conn.transaction().map_err(init)?;
                tx.execute_batch(&format!("DROP TABLE {TABLE};")).map_err(init)?;
                tx.execute_batch(SCHEMA).map_err(init)?;
                tx.commit().map_err(init)?;
                Ok(Synced::Recreated(detail))
            }
        },
    }
}
