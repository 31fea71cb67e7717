// App Shelf persistence adapter
// Key/value get-or-default and set over the SQLite `kv_store` table.
// Values are stored as JSON text; every failure is logged and reported as a
// boolean or a default value, never propagated.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::database::Database;
use crate::types::errors::StorageError;

/// Keys of the independently persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Bookmarks,
    Settings,
    DarkMode,
    Widgets,
    FirstRun,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Bookmarks,
        StorageKey::Settings,
        StorageKey::DarkMode,
        StorageKey::Widgets,
        StorageKey::FirstRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Bookmarks => "bookmarksData",
            StorageKey::Settings => "appSettings",
            StorageKey::DarkMode => "darkMode",
            StorageKey::Widgets => "widgetsData",
            StorageKey::FirstRun => "appShelf_firstRun",
        }
    }
}

/// Shared handle to the key/value store. Cloning shares the same database.
#[derive(Clone)]
pub struct Storage {
    db: Rc<Database>,
}

impl Storage {
    pub fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn write<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key.as_str(), json, Self::now()],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        match raw {
            Some(text) if !text.is_empty() => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StorageError::SerializationError(e.to_string())),
            _ => Ok(None),
        }
    }

    /// Serializes `value` and stores it under `key`, replacing any prior value.
    ///
    /// Returns `false` if serialization or the write failed.
    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> bool {
        match self.write(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "error saving to storage");
                false
            }
        }
    }

    /// Loads the value stored under `key`, or `default` if it is absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        match self.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "error loading from storage");
                default
            }
        }
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains(&self, key: StorageKey) -> bool {
        self.db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM kv_store WHERE key = ?1",
                params![key.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    pub fn remove(&self, key: StorageKey) -> bool {
        match self
            .db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key.as_str()])
        {
            Ok(_) => true,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "error removing from storage");
                false
            }
        }
    }

    /// Removes every App Shelf record.
    pub fn clear_all(&self) -> bool {
        let keys: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        let placeholders = vec!["?"; keys.len()].join(", ");
        let sql = format!("DELETE FROM kv_store WHERE key IN ({})", placeholders);
        match self
            .db
            .connection()
            .execute(&sql, rusqlite::params_from_iter(keys))
        {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "error clearing storage");
                false
            }
        }
    }
}
