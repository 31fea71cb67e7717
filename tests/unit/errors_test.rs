use appshelf::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::SerializationError("bad json".to_string()).to_string(),
        "Storage serialization error: bad json"
    );
    assert_eq!(
        StorageError::DatabaseError("disk full".to_string()).to_string(),
        "Storage database error: disk full"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_not_found_display() {
    let err = BookmarkError::NotFound("https://example.com".to_string());
    assert_eq!(err.to_string(), "Bookmark not found: https://example.com");
}

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::FolderNotFound("work".to_string()).to_string(),
        "Bookmark folder not found: work"
    );
    assert_eq!(
        BookmarkError::InvalidData("missing 'folders'".to_string()).to_string(),
        "Invalid bookmark data: missing 'folders'"
    );
    assert_eq!(
        BookmarkError::IoError("permission denied".to_string()).to_string(),
        "Bookmark file error: permission denied"
    );
    assert_eq!(
        BookmarkError::PersistenceFailed("bookmarksData".to_string()).to_string(),
        "Failed to persist bookmarks under key: bookmarksData"
    );
}

#[test]
fn bookmark_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::NotFound("x".to_string()));
    assert!(err.source().is_none());
}

// === FolderError Tests ===

#[test]
fn folder_error_display_variants() {
    assert_eq!(
        FolderError::NotFound("dev".to_string()).to_string(),
        "Folder not found: dev"
    );
    assert_eq!(
        FolderError::DuplicateId("dev".to_string()).to_string(),
        "Folder id already exists: dev"
    );
    assert_eq!(
        FolderError::ReservedId("unorganized".to_string()).to_string(),
        "Folder id is reserved: unorganized"
    );
    assert_eq!(
        FolderError::EmptyField("name".to_string()).to_string(),
        "Folder name cannot be empty"
    );
    assert_eq!(
        FolderError::PersistenceFailed("bookmarksData".to_string()).to_string(),
        "Failed to persist folders under key: bookmarksData"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::SerializationError("oops".to_string()).to_string(),
        "Settings serialization error: oops"
    );
    assert_eq!(
        SettingsError::InvalidKey("theme".to_string()).to_string(),
        "Invalid settings key: theme"
    );
    assert_eq!(
        SettingsError::InvalidValue("not a string".to_string()).to_string(),
        "Invalid settings value: not a string"
    );
    assert_eq!(
        SettingsError::PersistenceFailed("appSettings".to_string()).to_string(),
        "Failed to persist settings under key: appSettings"
    );
}

// === WidgetError Tests ===

#[test]
fn widget_error_display_variants() {
    assert_eq!(
        WidgetError::NotFound("widget_1".to_string()).to_string(),
        "Widget not found: widget_1"
    );
    assert_eq!(
        WidgetError::ItemNotFound("todo_1".to_string()).to_string(),
        "Todo item not found: todo_1"
    );
    assert_eq!(
        WidgetError::ContentMismatch("note has no items".to_string()).to_string(),
        "Widget content mismatch: note has no items"
    );
    assert_eq!(
        WidgetError::PersistenceFailed("widgetsData".to_string()).to_string(),
        "Failed to persist widgets under key: widgetsData"
    );
}

#[test]
fn widget_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(WidgetError::NotFound("w".to_string()));
    assert!(err.source().is_none());
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::IoError("no such file".to_string()).to_string(),
        "Config I/O error: no such file"
    );
    assert_eq!(
        ConfigError::Parse("expected value".to_string()).to_string(),
        "Config parse error: expected value"
    );
    assert_eq!(
        ConfigError::InvalidValue("favicon_size".to_string()).to_string(),
        "Invalid config value: favicon_size"
    );
}
