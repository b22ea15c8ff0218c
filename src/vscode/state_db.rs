//! Access to a workspace's state.vscdb
//!
//! The editor keeps per-workspace UI state in a SQLite key/value table:
//! `ItemTable(key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)`.

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

/// File name of the state database inside a workspace storage directory
pub const STATE_DB_FILE: &str = "state.vscdb";

/// Key under which the extensions assistant stores the suppression flag
pub const IGNORE_KEY: &str = "extensionsAssistant/workspaceRecommendationsIgnore";

/// Parse a stored flag value; the editor writes `true`/`false`, older tools wrote `1`/`0`
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Read the ignore flag from a workspace storage directory.
///
/// A missing row means the user never answered the prompt, i.e. `false`.
/// So does a row whose value is NULL.
pub fn read_ignore_flag(workspace_dir: &Path) -> Result<bool> {
    let db_path = workspace_dir.join(STATE_DB_FILE);

    let conn = Connection::open_with_flags(
        &db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open: {}", db_path.display()))?;

    // The column is untyped; read it as text whatever affinity it got
    let value: Option<Option<String>> = conn
        .query_row(
            "SELECT CAST(value AS TEXT) FROM ItemTable WHERE key = ?1",
            [IGNORE_KEY],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("Failed to query: {}", db_path.display()))?;

    match value.flatten() {
        None => Ok(false),
        Some(raw) => match parse_flag(&raw) {
            Some(flag) => Ok(flag),
            None => bail!(
                "Unrecognized value {:?} for {} in {}",
                raw,
                IGNORE_KEY,
                db_path.display()
            ),
        },
    }
}

/// Write the ignore flag into a workspace storage directory.
///
/// Upserts the row so projects that never had the key get one.
pub fn write_ignore_flag(workspace_dir: &Path, ignore: bool) -> Result<()> {
    let db_path = workspace_dir.join(STATE_DB_FILE);

    if !db_path.exists() {
        bail!("State database does not exist: {}", db_path.display());
    }

    let conn = Connection::open_with_flags(
        &db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open: {}", db_path.display()))?;

    let value = if ignore { "true" } else { "false" };
    conn.execute(
        "INSERT OR REPLACE INTO ItemTable (key, value) VALUES (?1, ?2)",
        [IGNORE_KEY, value],
    )
    .with_context(|| format!("Failed to update: {}", db_path.display()))?;

    Ok(())
}

/// Create an empty state database with the editor's schema
#[cfg(test)]
pub(crate) fn create_state_db(workspace_dir: &Path, flag: Option<&str>) -> Connection {
    let conn = Connection::open(workspace_dir.join(STATE_DB_FILE)).unwrap();
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
    )
    .unwrap();
    if let Some(value) = flag {
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            [IGNORE_KEY, value],
        )
        .unwrap();
    }
    conn
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_missing_row_reads_false() {
        let dir = TempDir::new().unwrap();
        create_state_db(dir.path(), None);
        assert!(!read_ignore_flag(dir.path()).unwrap());
    }

    #[test]
    fn test_reads_stored_flag() {
        let dir = TempDir::new().unwrap();
        create_state_db(dir.path(), Some("true"));
        assert!(read_ignore_flag(dir.path()).unwrap());
    }

    #[test]
    fn test_reads_integer_flag() {
        let dir = TempDir::new().unwrap();
        let conn = create_state_db(dir.path(), None);
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, 1)",
            [IGNORE_KEY],
        )
        .unwrap();
        drop(conn);
        assert!(read_ignore_flag(dir.path()).unwrap());
    }

    #[test]
    fn test_null_value_reads_false() {
        let dir = TempDir::new().unwrap();
        let conn = create_state_db(dir.path(), None);
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, NULL)",
            [IGNORE_KEY],
        )
        .unwrap();
        drop(conn);
        assert!(!read_ignore_flag(dir.path()).unwrap());
    }

    #[test]
    fn test_unrecognized_value_is_error() {
        let dir = TempDir::new().unwrap();
        create_state_db(dir.path(), Some("maybe"));
        let err = read_ignore_flag(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Unrecognized value"));
    }

    #[test]
    fn test_write_inserts_missing_row() {
        let dir = TempDir::new().unwrap();
        drop(create_state_db(dir.path(), None));

        write_ignore_flag(dir.path(), true).unwrap();
        assert!(read_ignore_flag(dir.path()).unwrap());
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        drop(create_state_db(dir.path(), Some("true")));

        write_ignore_flag(dir.path(), false).unwrap();
        write_ignore_flag(dir.path(), false).unwrap();
        assert!(!read_ignore_flag(dir.path()).unwrap());

        let conn = Connection::open(dir.path().join(STATE_DB_FILE)).unwrap();
        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM ItemTable WHERE key = ?1",
                [IGNORE_KEY],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_write_without_database_fails() {
        let dir = TempDir::new().unwrap();
        assert!(write_ignore_flag(dir.path(), true).is_err());
    }
}
