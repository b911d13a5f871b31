//! Storage layer for bulletin.
//!
//! The board persists through a small synchronous key-value interface,
//! [`KeyValueStore`]. [`SqliteStore`] is the durable implementation used by
//! the command line; [`MemoryStore`] backs unit tests.

mod memory;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use memory::MemoryStore;

/// A synchronous string-to-string store.
///
/// Writes replace the whole value under a key; there is no partial update.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns `true` if a value was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<bool>;
}

/// `SQLite`-backed key-value store.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        schema::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let (items, value_bytes): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(LENGTH(CAST(value AS BLOB))), 0) FROM kv",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            items: u64::try_from(items).unwrap_or(0),
            value_bytes: u64::try_from(value_bytes).unwrap_or(0),
            db_size_bytes,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        debug!(key, found = value.is_some(), "read item");
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "wrote item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        debug!(key, removed = affected > 0, "removed item");
        Ok(affected > 0)
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of keys stored.
    pub items: u64,
    /// Total size of all values in bytes.
    pub value_bytes: u64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().expect("failed to create test store")
    }

    #[test]
    fn test_open_in_memory() {
        assert!(SqliteStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_set_and_get() {
        let mut store = create_test_store();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_get_missing() {
        let store = create_test_store();
        assert_eq!(store.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = create_test_store();
        store.set_item("k", "first").unwrap();
        store.set_item("k", "second").unwrap();

        assert_eq!(store.get_item("k").unwrap(), Some("second".to_string()));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_remove_item() {
        let mut store = create_test_store();
        store.set_item("k", "v").unwrap();

        assert!(store.remove_item("k").unwrap());
        assert!(!store.remove_item("k").unwrap());
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_unicode_value() {
        let mut store = create_test_store();
        let value = "まだ投稿がありません 🎉";
        store.set_item("k", value).unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some(value));
    }

    #[test]
    fn test_keys_sorted() {
        let mut store = create_test_store();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_stats_empty() {
        let store = create_test_store();
        let stats = store.stats().unwrap();
        assert_eq!(stats.items, 0);
        assert_eq!(stats.value_bytes, 0);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let mut store = create_test_store();
        store.set_item("a", "12345").unwrap();
        store.set_item("b", "山").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.value_bytes, 8);
    }

    #[test]
    fn test_path() {
        let store = create_test_store();
        assert_eq!(store.path(), Path::new(":memory:"));
    }

    #[test]
    fn test_open_file_based_persists() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("bulletin_test_{}.db", std::process::id()));

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.set_item("k", "persisted").unwrap();
            assert_eq!(store.path(), db_path);
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some("persisted".to_string()));
        assert!(store.stats().unwrap().db_size_bytes > 0);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let root = temp_dir.join(format!("bulletin_test_dirs_{}", std::process::id()));
        let nested_path = root.join("nested/board.db");
        let _ = std::fs::remove_dir_all(&root);

        let store = SqliteStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        let _ = std::fs::remove_dir_all(&root);
    }
}
