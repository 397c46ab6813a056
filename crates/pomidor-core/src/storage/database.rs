//! SQLite-backed state store.
//!
//! A single `kv` table holds every persisted value as JSON text; the
//! database lives at `<data_dir>/pomidor.db`.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use super::store::StateStore;
use crate::error::StorageError;

/// SQLite key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/pomidor.db`, creating the file and
    /// schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("pomidor.db");
        Self::open_at(&path)
    }

    /// Open (and migrate) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl StateStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.get("settings").unwrap().is_none());
        db.set("settings", "{\"work_duration\":25}").unwrap();
        assert_eq!(
            db.get("settings").unwrap().as_deref(),
            Some("{\"work_duration\":25}")
        );
        db.set("settings", "{\"work_duration\":30}").unwrap();
        assert_eq!(
            db.get("settings").unwrap().as_deref(),
            Some("{\"work_duration\":30}")
        );
    }

    #[test]
    fn open_at_creates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pomidor.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.set("completedPomodoros", "7").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("completedPomodoros").unwrap().as_deref(), Some("7"));
    }
}
