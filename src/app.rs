//! App Core for App Shelf.
//!
//! Central struct holding the stores over one shared storage adapter.

use std::path::Path;
use std::rc::Rc;

use tracing::info;

use crate::database::connection::Database;
use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::folder_manager::FolderManager;
use crate::managers::widget_manager::WidgetManager;
use crate::services::settings_engine::SettingsEngine;
use crate::services::storage::Storage;
use crate::types::config::AppConfig;

/// Central application struct holding all stores.
///
/// `FolderManager` is not stored: it borrows the bookmark manager mutably,
/// so it is lent out on demand through [`App::folders`].
pub struct App {
    pub storage: Storage,
    pub bookmarks: BookmarkManager,
    pub settings: SettingsEngine,
    pub widgets: WidgetManager,
    pub config: AppConfig,
}

impl App {
    /// Opens the database at `db_path` and loads every store.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, rusqlite::Error> {
        Self::with_config(db_path, AppConfig::default())
    }

    /// Opens the database named by `config` (or the platform default).
    pub fn from_config(config: AppConfig) -> Result<Self, rusqlite::Error> {
        let db_path = config.resolved_database_path();
        Self::with_config(db_path, config)
    }

    fn with_config<P: AsRef<Path>>(db_path: P, config: AppConfig) -> Result<Self, rusqlite::Error> {
        let db = Database::open(&db_path)?;
        info!(path = %db_path.as_ref().display(), "database opened");
        Ok(Self::from_database(db, config))
    }

    /// Builds the stores over an already-open database.
    pub fn from_database(db: Database, config: AppConfig) -> Self {
        let storage = Storage::new(Rc::new(db));
        let bookmarks = BookmarkManager::new(storage.clone());
        let settings = SettingsEngine::new(storage.clone());
        let widgets = WidgetManager::new(storage.clone());

        Self {
            storage,
            bookmarks,
            settings,
            widgets,
            config,
        }
    }

    /// Lends a folder manager over the bookmark tree.
    pub fn folders(&mut self) -> FolderManager<'_> {
        FolderManager::new(&mut self.bookmarks)
    }
}
