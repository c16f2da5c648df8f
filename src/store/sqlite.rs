//! SQLite key/value backend
//!
//! Keeps every key in one `kv_store` table. `schema_version` records the
//! layout so a later change can migrate existing files.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{StateStore, StoreError, StoreKey};

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Database wrapper shared between clones
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key.as_str()],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            rusqlite::params![key.as_str(), value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }
}

/// Schema version 1. `updated_at` is Unix time in milliseconds.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("state.db")).unwrap();

        let conn = store.conn().unwrap();
        let version: i32 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('kv_store')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(columns, vec!["key", "value", "updated_at"]);
    }

    #[test]
    fn test_write_stamps_updated_at() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write(StoreKey::ChallengeData, "{}").unwrap();

        let conn = store.conn().unwrap();
        let stamped: i64 = conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                [StoreKey::ChallengeData.as_str()],
                |r| r.get(0),
            )
            .unwrap();
        assert!(stamped > 0);

        let versions: i32 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_upsert_overwrites() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write(StoreKey::Reminder, "a").unwrap();
        store.write(StoreKey::Reminder, "b").unwrap();
        assert_eq!(store.read(StoreKey::Reminder).unwrap().as_deref(), Some("b"));

        store.remove(StoreKey::Reminder).unwrap();
        assert!(store.read(StoreKey::Reminder).unwrap().is_none());
    }

    #[test]
    fn test_reopen_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");
        SqliteStore::open(&path)
            .unwrap()
            .write(StoreKey::UserHabits, "[]")
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.read(StoreKey::UserHabits).unwrap().as_deref(), Some("[]"));
    }
}
