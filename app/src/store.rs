//! Device-local key/value storage
//!
//! History and favorites are stored as JSON string arrays under fixed keys.
//! The SQLite store opens a new connection per call, so it can be shared
//! freely between screens.

use rusqlite::OptionalExtension;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::ShabdaError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ShabdaError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ShabdaError>;
    fn remove(&self, key: &str) -> Result<(), ShabdaError>;
}

/// Read a string list; missing or corrupt values are an empty list.
pub fn load_string_list(store: &dyn KeyValueStore, key: &str) -> Vec<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::debug!(key, error = %e, "stored list unreadable, starting empty");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!(key, error = %e, "stored list corrupt, starting empty");
        Vec::new()
    })
}

/// Overwrite a string list (last write wins)
pub fn save_string_list(
    store: &dyn KeyValueStore,
    key: &str,
    values: &[String],
) -> Result<(), ShabdaError> {
    let raw = serde_json::to_string(values).map_err(|e| ShabdaError::Storage(e.to_string()))?;
    store.set(key, &raw)
}

/// `app_settings` table in `settings.db`
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (and create if needed) the settings database
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ShabdaError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ShabdaError::Storage(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        let store = Self { path };
        store.connection()?;
        Ok(store)
    }

    fn connection(&self) -> Result<rusqlite::Connection, ShabdaError> {
        let conn = rusqlite::Connection::open(&self.path)
            .map_err(|e| ShabdaError::Database(format!("unable to open database file: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_settings (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;

        Ok(conn)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShabdaError> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShabdaError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ShabdaError> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM app_settings WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Process-local store, used by tests and as a fallback when the settings
/// database cannot be opened
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShabdaError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShabdaError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ShabdaError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}
