//! Local persistence for the user identifier, scan history, and chat transcript.
//!
//! Everything lives behind [`KeyValueStore`]: string keys, string values.
//! Structured values are stored as JSON. The on-disk store is a single
//! `SQLite` file under the storage root:
//!
//! ```text
//! <root>/
//!   fishid.sqlite    # kv(key, value, updated_at)
//! ```

mod history;
#[cfg(test)]
mod memory;
mod transcript;
mod user;

use std::{fs, path::PathBuf};

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension};

pub use history::{clear_history, load_history, record_scan};
#[cfg(test)]
pub use memory::MemoryStore;
#[cfg(test)]
pub use transcript::TRANSCRIPT_LIMIT;
pub use transcript::{append_transcript, clear_transcript, load_transcript};
pub use user::{generate_user_id, user_id};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A string key-value store.
///
/// `get` of a missing key is `Ok(None)`. `delete` of a missing key is a no-op.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// `SQLite`-backed key-value store.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the store under the given root directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join("fishid.sqlite"))?;
        Self::with_connection(conn)
    }

    /// Returns the default storage root: `~/.fishid/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fishid"))
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Timestamp::now().to_string()],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("fishid")).unwrap();
        (dir, storage)
    }

    #[test]
    fn creates_database_file() {
        let (dir, _storage) = test_storage();
        assert!(dir.path().join("fishid").join("fishid.sqlite").exists());
    }

    #[test]
    fn get_missing_key_is_none() {
        let (_dir, storage) = test_storage();
        assert_eq!(storage.get("user_id").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let (_dir, storage) = test_storage();
        storage.set("user_id", "FISH-abc-123").unwrap();
        assert_eq!(storage.get("user_id").unwrap().as_deref(), Some("FISH-abc-123"));
    }

    #[test]
    fn set_overwrites() {
        let (_dir, storage) = test_storage();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let (_dir, storage) = test_storage();
        storage.set("k", "v").unwrap();
        storage.delete("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);

        // Deleting again is not an error.
        storage.delete("k").unwrap();
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("fishid");
        Storage::new(&root).unwrap().set("k", "v").unwrap();

        let reopened = Storage::new(&root).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }
}
