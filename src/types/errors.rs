use std::fmt;

// === StorageError ===

/// Errors raised inside the key/value persistence layer.
///
/// These never cross the [`Storage`](crate::services::storage::Storage) boundary;
/// the adapter logs them and reports a boolean or a default value instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to serialize or deserialize a stored value.
    SerializationError(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    /// No bookmark with the given URL exists in the container.
    NotFound(String),
    /// The target folder was not found.
    FolderNotFound(String),
    /// A bookmark document failed shape validation.
    InvalidData(String),
    /// Reading or writing an import/export file failed.
    IoError(String),
    /// The persistence adapter refused the write for the given key.
    PersistenceFailed(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(url) => write!(f, "Bookmark not found: {}", url),
            BookmarkError::FolderNotFound(id) => write!(f, "Bookmark folder not found: {}", id),
            BookmarkError::InvalidData(msg) => write!(f, "Invalid bookmark data: {}", msg),
            BookmarkError::IoError(msg) => write!(f, "Bookmark file error: {}", msg),
            BookmarkError::PersistenceFailed(key) => {
                write!(f, "Failed to persist bookmarks under key: {}", key)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === FolderError ===

/// Errors related to folder identity operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderError {
    /// Folder with the given ID was not found.
    NotFound(String),
    /// A folder with the given ID already exists.
    DuplicateId(String),
    /// The ID is reserved and cannot name a real folder.
    ReservedId(String),
    /// A required field was empty.
    EmptyField(String),
    /// The persistence adapter refused the write for the given key.
    PersistenceFailed(String),
}

impl fmt::Display for FolderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderError::NotFound(id) => write!(f, "Folder not found: {}", id),
            FolderError::DuplicateId(id) => write!(f, "Folder id already exists: {}", id),
            FolderError::ReservedId(id) => write!(f, "Folder id is reserved: {}", id),
            FolderError::EmptyField(field) => write!(f, "Folder {} cannot be empty", field),
            FolderError::PersistenceFailed(key) => {
                write!(f, "Failed to persist folders under key: {}", key)
            }
        }
    }
}

impl std::error::Error for FolderError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is not a recognized setting.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
    /// The persistence adapter refused the write for the given key.
    PersistenceFailed(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
            SettingsError::PersistenceFailed(key) => {
                write!(f, "Failed to persist settings under key: {}", key)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === WidgetError ===

/// Errors related to dashboard widget operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Widget with the given ID was not found.
    NotFound(String),
    /// Todo item with the given ID was not found in the widget.
    ItemNotFound(String),
    /// A content patch does not match the widget's type.
    ContentMismatch(String),
    /// The persistence adapter refused the write for the given key.
    PersistenceFailed(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::NotFound(id) => write!(f, "Widget not found: {}", id),
            WidgetError::ItemNotFound(id) => write!(f, "Todo item not found: {}", id),
            WidgetError::ContentMismatch(msg) => {
                write!(f, "Widget content mismatch: {}", msg)
            }
            WidgetError::PersistenceFailed(key) => {
                write!(f, "Failed to persist widgets under key: {}", key)
            }
        }
    }
}

impl std::error::Error for WidgetError {}

// === ConfigError ===

/// Errors related to loading or saving the application config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// The config file exists but could not be parsed.
    Parse(String),
    /// The config contains an invalid value.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
