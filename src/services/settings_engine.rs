// App Shelf Settings Engine
// Manages user preferences: link target, search engine and per-folder
// expand/collapse state. Dark mode is persisted under its own key.

use serde_json::Value;
use tracing::{debug, info};

use crate::services::storage::{Storage, StorageKey};
use crate::types::errors::SettingsError;
use crate::types::search::{SearchEngine, SEARCH_ENGINES};
use crate::types::settings::{AppSettings, BookmarkTarget, FolderExpansion, SETTING_KEYS};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn get_settings(&self) -> &AppSettings;
    fn get_value(&self, key: &str) -> Option<Value>;
    fn get_value_or(&self, key: &str, default: Value) -> Value;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn is_dark_mode(&self) -> bool;
    fn toggle_dark_mode(&mut self) -> bool;
    fn set_dark_mode(&mut self, enabled: bool) -> Result<(), SettingsError>;
    fn is_folder_expanded(&self, folder_id: &str) -> bool;
    fn expand_folder(&mut self, folder_id: &str) -> Result<(), SettingsError>;
    fn collapse_folder(&mut self, folder_id: &str) -> Result<(), SettingsError>;
}

/// Settings engine persisting preferences through the storage adapter.
pub struct SettingsEngine {
    storage: Storage,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Loads stored settings, falling back to defaults.
    ///
    /// On first run (no first-run marker stored yet) expansion is reset to
    /// all-expanded and the marker is written.
    pub fn new(storage: Storage) -> Self {
        let settings = storage.load(StorageKey::Settings, AppSettings::default());
        let mut engine = Self { storage, settings };

        if !engine.storage.contains(StorageKey::FirstRun) {
            info!("first run, expanding all folders");
            engine.storage.save(StorageKey::FirstRun, &false);
            engine.settings.expanded_folders = FolderExpansion::AllExpanded;
            // A failed write is already logged by the adapter; the in-memory
            // state is still correct for this session.
            let _ = engine.save();
        }
        engine
    }

    fn save(&self) -> Result<(), SettingsError> {
        if self.storage.save(StorageKey::Settings, &self.settings) {
            Ok(())
        } else {
            Err(SettingsError::PersistenceFailed(
                StorageKey::Settings.as_str().to_string(),
            ))
        }
    }

    pub fn bookmark_target(&self) -> BookmarkTarget {
        self.settings.bookmark_target
    }

    /// The currently selected search engine, if it is a known one.
    pub fn search_engine(&self) -> Option<&'static SearchEngine> {
        find_search_engine(&self.settings.search_engine)
    }
}

/// Looks up a built-in search engine by name.
pub fn find_search_engine(name: &str) -> Option<&'static SearchEngine> {
    SEARCH_ENGINES.iter().find(|engine| engine.name == name)
}

/// Builds the query URL for `term` on the named engine.
///
/// The term is percent-encoded the way `encodeURIComponent` does.
pub fn search_url(engine: &str, term: &str) -> Option<String> {
    find_search_engine(engine).map(|e| format!("{}{}", e.url, urlencoding::encode(term)))
}

impl SettingsEngineTrait for SettingsEngine {
    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Returns a setting by its stored name (`bookmarkTarget`, `searchEngine`,
    /// `expandedFolders`), or `None` for an unknown key.
    fn get_value(&self, key: &str) -> Option<Value> {
        if !SETTING_KEYS.contains(&key) {
            return None;
        }
        serde_json::to_value(&self.settings)
            .ok()
            .and_then(|json| json.get(key).cloned())
    }

    fn get_value_or(&self, key: &str, default: Value) -> Value {
        self.get_value(key).unwrap_or(default)
    }

    /// Updates one setting by its stored name and persists.
    ///
    /// Unknown keys are rejected, and the new value must deserialize into the
    /// typed settings record.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if !SETTING_KEYS.contains(&key) {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        match json_value.as_object_mut() {
            Some(map) => {
                map.insert(key.to_string(), value);
            }
            None => {
                return Err(SettingsError::SerializationError(
                    "settings did not serialize to an object".to_string(),
                ))
            }
        }

        let new_settings: AppSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.settings = new_settings;
        debug!(key, "setting updated");
        self.save()
    }

    /// Resets all settings to defaults and persists them.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()
    }

    fn is_dark_mode(&self) -> bool {
        self.storage.load(StorageKey::DarkMode, false)
    }

    /// Flips dark mode and returns the new value.
    fn toggle_dark_mode(&mut self) -> bool {
        let enabled = !self.is_dark_mode();
        self.storage.save(StorageKey::DarkMode, &enabled);
        enabled
    }

    fn set_dark_mode(&mut self, enabled: bool) -> Result<(), SettingsError> {
        if self.storage.save(StorageKey::DarkMode, &enabled) {
            Ok(())
        } else {
            Err(SettingsError::PersistenceFailed(
                StorageKey::DarkMode.as_str().to_string(),
            ))
        }
    }

    fn is_folder_expanded(&self, folder_id: &str) -> bool {
        self.settings.expanded_folders.is_expanded(folder_id)
    }

    /// Marks a folder expanded; persists only if the state changed.
    fn expand_folder(&mut self, folder_id: &str) -> Result<(), SettingsError> {
        if self.settings.expanded_folders.expand(folder_id) {
            return self.save();
        }
        Ok(())
    }

    /// Marks a folder collapsed; persists only if the state changed.
    ///
    /// From the all-expanded state this leaves an empty explicit set, so
    /// every other folder reads as collapsed too.
    fn collapse_folder(&mut self, folder_id: &str) -> Result<(), SettingsError> {
        if self.settings.expanded_folders.collapse(folder_id) {
            return self.save();
        }
        Ok(())
    }
}
