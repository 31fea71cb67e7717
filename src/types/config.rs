use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::platform;

/// Process-level configuration, read from `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the key/value store. Defaults to `<data dir>/appshelf.db`.
    #[serde(default)]
    pub database_path: Option<String>,
    #[serde(default = "default_favicon_size")]
    pub favicon_size: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory `bookmarks.json` is exported to. Defaults to the working directory.
    #[serde(default)]
    pub export_dir: Option<String>,
}

fn default_favicon_size() -> u32 {
    128
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            favicon_size: default_favicon_size(),
            log_level: default_log_level(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves the database file path, falling back to the platform data directory.
    pub fn resolved_database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => platform::get_data_dir().join("appshelf.db"),
        }
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        match &self.export_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from("."),
        }
    }
}
