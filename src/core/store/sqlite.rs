//! SQLite blob store for persistent storage.

use super::BlobStore;
use crate::error::StoreError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// SQLite-backed persistent blob store
///
/// Uses WAL (Write-Ahead Logging) mode so readers are not blocked by a
/// writer in another process.
pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteBlobStore {
    /// Open or create a store at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| StoreError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::init(conn, path.to_path_buf())
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            reason: e.to_string(),
        })?;

        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, db_path: PathBuf) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| {
            StoreError::Unavailable(format!("connection to {} is poisoned", self.db_path.display()))
        })
    }
}

impl BlobStore for SqliteBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let conn = self.lock()?;

        conn.query_row("SELECT value FROM blobs WHERE key = ?", [key], |row| {
            row.get::<_, Vec<u8>>(0)
        })
        .optional()
        .map_err(|e| StoreError::QueryFailed(e.to_string()))
    }

    fn set_blob(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, Utc::now().timestamp()],
        )
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    fn delete_blob(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;

        conn.execute("DELETE FROM blobs WHERE key = ?", [key])
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("ledger.db");

        let store = SqliteBlobStore::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(store.path(), db_path.as_path());
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = SqliteBlobStore::open_in_memory().unwrap();

        store.set_blob("k", b"first").unwrap();
        store.set_blob("k", b"second").unwrap();

        assert_eq!(store.get_blob("k").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn delete_missing_key_is_ok() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.delete_blob("never-set").unwrap();
        assert!(store.get_blob("never-set").unwrap().is_none());
    }

    #[test]
    fn blobs_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("ledger.db");

        {
            let store = SqliteBlobStore::open(&db_path).unwrap();
            store.set_blob("k", b"persisted").unwrap();
        }

        let store = SqliteBlobStore::open(&db_path).unwrap();
        assert_eq!(store.get_blob("k").unwrap(), Some(b"persisted".to_vec()));
    }
}
