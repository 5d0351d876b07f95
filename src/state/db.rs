// SQLite database setup
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::storage::StorageError;
use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("No coffee record with id {0}")]
    NotFound(i64),
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the catalog database file.
///
/// Holds only the path; every operation opens its own connection and closes it
/// when done, committing as it goes.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn connect(&self) -> DbResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the catalog table if it does not exist yet.
    ///
    /// Safe to call on every startup; an existing table and its rows are left
    /// untouched.
    pub fn ensure_schema(&self) -> DbResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = self.connect()?;
        create_tables(&conn)?;
        log::debug!("Catalog schema ready in {}", self.path.display());
        Ok(())
    }
}

fn create_tables(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS coffee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sort_name TEXT NOT NULL,
            degree TEXT NOT NULL,
            type TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            size INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table_count(conn: &Connection, name: &str) -> i32 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    fn user_table_count(conn: &Connection) -> i32 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_db_init() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        assert_eq!(table_count(&conn, "coffee"), 1);
        assert_eq!(user_table_count(&conn), 1);
    }

    #[test]
    fn test_ensure_schema_twice() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("coffee.sqlite"));

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        let conn = store.connect().unwrap();
        assert_eq!(table_count(&conn, "coffee"), 1);
        assert_eq!(user_table_count(&conn), 1);
    }

    #[test]
    fn test_ensure_schema_recreates_dropped_table() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("coffee.sqlite"));
        store.ensure_schema().unwrap();

        store
            .connect()
            .unwrap()
            .execute("DROP TABLE coffee", [])
            .unwrap();

        store.ensure_schema().unwrap();
        let conn = store.connect().unwrap();
        assert_eq!(table_count(&conn, "coffee"), 1);
        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_ensure_schema_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("coffee.sqlite");
        let store = CatalogStore::new(&path);

        store.ensure_schema().unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_ensure_schema_adopts_existing_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coffee.sqlite");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE coffee (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    sort_name TEXT NOT NULL,
                    degree TEXT NOT NULL,
                    type TEXT NOT NULL,
                    description TEXT,
                    price REAL NOT NULL,
                    size INTEGER NOT NULL
                );
                INSERT INTO coffee (sort_name, degree, type, description, price, size)
                VALUES ('Robusta', 'Dark', 'Whole Bean', NULL, 7.0, 500);",
            )
            .unwrap();
        }

        let store = CatalogStore::new(&path);
        store.ensure_schema().unwrap();

        let conn = store.connect().unwrap();
        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_ensure_schema_unwritable_location() {
        let dir = tempdir().unwrap();
        // A directory where the database file should be cannot be opened as SQLite
        let path = dir.path().join("coffee.sqlite");
        std::fs::create_dir(&path).unwrap();

        let store = CatalogStore::new(&path);
        assert!(store.ensure_schema().is_err());
    }
}
