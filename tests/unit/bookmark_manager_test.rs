//! Unit tests for the BookmarkManager public API.
//!
//! These tests exercise add, find, update, delete, search, import and export
//! through the `BookmarkManagerTrait` interface, using an in-memory SQLite
//! database.

use std::rc::Rc;

use appshelf::database::Database;
use appshelf::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait, EXPORT_FILE_NAME};
use appshelf::services::storage::{Storage, StorageKey};
use appshelf::types::bookmark::{Bookmark, BookmarkData, UNORGANIZED};
use appshelf::types::errors::BookmarkError;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Helper: create a BookmarkManager backed by a fresh in-memory database,
/// seeded with a single empty `dev` folder.
fn setup() -> (Storage, BookmarkManager) {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let storage = Storage::new(Rc::new(db));
    let mut mgr = BookmarkManager::new(storage.clone());
    mgr.import_bookmarks(json!({"folders": [{"id": "dev", "bookmarks": []}], "unorganized": []}))
        .unwrap();
    (storage, mgr)
}

/// Adding to a folder stores the normalized url with no image.
#[test]
fn test_add_to_folder_normalizes_url() {
    let (_storage, mut mgr) = setup();

    mgr.add_bookmark("Site", "example.com", "dev", None).unwrap();

    let stored = json!(mgr.bookmarks_in("dev").unwrap());
    assert_eq!(
        stored,
        json!([{"name": "Site", "url": "https://example.com", "image": null}])
    );
}

/// Adding with the reserved id goes to the unorganized list.
#[test]
fn test_add_to_unorganized() {
    let (_storage, mut mgr) = setup();

    mgr.add_bookmark("Docs", "https://docs.rs", UNORGANIZED, Some("https://docs.rs/icon.png"))
        .unwrap();

    let found = mgr.find_bookmark("https://docs.rs", UNORGANIZED).unwrap();
    assert_eq!(found.bookmark.image.as_deref(), Some("https://docs.rs/icon.png"));
    assert!(found.folder.is_none());
    assert_eq!(found.bookmark_index, 0);
    assert!(mgr.bookmarks_in("dev").unwrap().is_empty());
}

/// Adding to an unknown folder fails and leaves the document untouched.
#[test]
fn test_add_to_missing_folder_fails() {
    let (_storage, mut mgr) = setup();
    let before = mgr.data().clone();

    let result = mgr.add_bookmark("Lost", "lost.com", "nowhere", None);

    assert_eq!(result, Err(BookmarkError::FolderNotFound("nowhere".to_string())));
    assert_eq!(*mgr.data(), before);
}

/// Every successful mutation is written through to storage.
#[test]
fn test_mutations_are_persisted() {
    let (storage, mut mgr) = setup();
    mgr.add_bookmark("Rust", "rust-lang.org", "dev", None).unwrap();

    let reloaded = BookmarkManager::load(&storage);
    assert_eq!(reloaded, *mgr.data());
    assert_eq!(reloaded.folders[0].bookmarks[0].url, "https://rust-lang.org");
}

/// Find reports folder and bookmark indices for folder hits.
#[test]
fn test_find_in_folder_reports_indices() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("A", "a.com", "dev", None).unwrap();
    mgr.add_bookmark("B", "b.com", "dev", None).unwrap();

    let found = mgr.find_bookmark("https://b.com", "dev").unwrap();
    assert_eq!(found.bookmark.name, "B");
    assert_eq!(found.folder.map(|f| f.id.as_str()), Some("dev"));
    assert_eq!(found.folder_index, Some(0));
    assert_eq!(found.bookmark_index, 1);
}

/// Find matches the url exactly, so the unnormalized form misses.
#[test]
fn test_find_is_exact_match() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("A", "a.com", "dev", None).unwrap();

    assert!(mgr.find_bookmark("a.com", "dev").is_none());
    assert!(mgr.find_bookmark("https://a.com", "other").is_none());
}

/// Updating moves the bookmark to the end of the destination.
#[test]
fn test_update_moves_between_containers() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("Old", "old.com", UNORGANIZED, None).unwrap();
    mgr.add_bookmark("Existing", "existing.com", "dev", None).unwrap();

    mgr.update_bookmark(
        "https://old.com",
        UNORGANIZED,
        Bookmark::new("New", "new.com", None),
        "dev",
    )
    .unwrap();

    assert!(mgr.bookmarks_in(UNORGANIZED).unwrap().is_empty());
    let dev = mgr.bookmarks_in("dev").unwrap();
    assert_eq!(dev.len(), 2);
    assert_eq!(dev[1], Bookmark::new("New", "https://new.com", None));
}

/// An invalid destination is rejected before the original is touched.
#[test]
fn test_update_to_missing_folder_keeps_original() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("Keep", "keep.com", "dev", None).unwrap();
    let before = mgr.data().clone();

    let result = mgr.update_bookmark(
        "https://keep.com",
        "dev",
        Bookmark::new("Keep", "keep.com", None),
        "missing",
    );

    assert_eq!(result, Err(BookmarkError::FolderNotFound("missing".to_string())));
    assert_eq!(*mgr.data(), before);
}

/// Updating a bookmark that does not exist reports it and changes nothing.
#[test]
fn test_update_missing_bookmark() {
    let (_storage, mut mgr) = setup();
    let before = mgr.data().clone();

    let result = mgr.update_bookmark(
        "https://ghost.com",
        "dev",
        Bookmark::new("Ghost", "ghost.com", None),
        UNORGANIZED,
    );

    assert_eq!(result, Err(BookmarkError::NotFound("https://ghost.com".to_string())));
    assert_eq!(*mgr.data(), before);
}

/// Delete removes only the first bookmark with a matching url.
#[test]
fn test_delete_removes_first_match() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("One", "dup.com", "dev", None).unwrap();
    mgr.add_bookmark("Two", "dup.com", "dev", None).unwrap();

    mgr.delete_bookmark("https://dup.com", "dev").unwrap();

    let dev = mgr.bookmarks_in("dev").unwrap();
    assert_eq!(dev.len(), 1);
    assert_eq!(dev[0].name, "Two");
}

/// Deleting something that is not there still succeeds and changes nothing.
#[test]
fn test_delete_missing_is_ok_noop() {
    let (_storage, mut mgr) = setup();
    let before = mgr.data().clone();

    assert!(mgr.delete_bookmark("https://nothing.com", "dev").is_ok());
    assert!(mgr.delete_bookmark("https://nothing.com", "no-folder").is_ok());
    assert_eq!(*mgr.data(), before);
}

#[test]
fn test_bookmarks_in_missing_folder() {
    let (_storage, mgr) = setup();
    assert!(matches!(
        mgr.bookmarks_in("nope"),
        Err(BookmarkError::FolderNotFound(_))
    ));
}

/// Search is case-insensitive over name and url, folders before unorganized.
#[test]
fn test_search_matches_name_and_url() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("Rust Book", "doc.rust-lang.org/book", UNORGANIZED, None)
        .unwrap();
    mgr.add_bookmark("Crates", "crates.io", "dev", None).unwrap();
    mgr.add_bookmark("Cargo guide", "doc.RUST-lang.org/cargo", "dev", None)
        .unwrap();

    let hits = mgr.search_bookmarks("RUST");
    let names: Vec<(&str, &str)> = hits
        .iter()
        .map(|h| (h.folder_id.as_str(), h.bookmark.name.as_str()))
        .collect();
    assert_eq!(names, vec![("dev", "Cargo guide"), (UNORGANIZED, "Rust Book")]);
}

/// Export then import restores a deep-equal document.
#[test]
fn test_export_import_round_trip() {
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("A", "a.com", "dev", Some("a.png")).unwrap();
    mgr.add_bookmark("B", "b.com", UNORGANIZED, None).unwrap();
    let before = mgr.data().clone();
    let exported = mgr.export_json().unwrap();

    mgr.import_bookmarks(json!({"folders": [], "unorganized": []}))
        .unwrap();
    assert_eq!(mgr.data().bookmark_count(), 0);

    mgr.import_json(&exported).unwrap();
    assert_eq!(*mgr.data(), before);
}

/// Export is indented JSON.
#[test]
fn test_export_is_pretty_printed() {
    let (_storage, mgr) = setup();
    let exported = mgr.export_json().unwrap();
    assert!(exported.contains('\n'));
    let parsed: Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed["folders"][0]["id"], "dev");
}

/// Import rejects documents with a wrong top-level shape.
#[test]
fn test_import_rejects_invalid_shape() {
    let (_storage, mut mgr) = setup();
    let before = mgr.data().clone();

    for bad in [
        json!([]),
        json!({"folders": []}),
        json!({"unorganized": []}),
        json!({"folders": {}, "unorganized": []}),
        json!({"folders": [], "unorganized": "none"}),
    ] {
        let result = mgr.import_bookmarks(bad.clone());
        assert!(
            matches!(result, Err(BookmarkError::InvalidData(_))),
            "{} should be rejected",
            bad
        );
    }
    assert_eq!(*mgr.data(), before);
}

#[test]
fn test_import_json_rejects_unparseable_text() {
    let (_storage, mut mgr) = setup();
    assert!(matches!(
        mgr.import_json("{ not json"),
        Err(BookmarkError::InvalidData(_))
    ));
}

/// Exporting to a directory writes `bookmarks.json`, which imports back.
#[test]
fn test_export_to_dir_and_import_file() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let (_storage, mut mgr) = setup();
    mgr.add_bookmark("Saved", "saved.com", "dev", None).unwrap();
    let before = mgr.data().clone();

    let path = mgr.export_to_dir(tmp.path()).unwrap();
    assert_eq!(path, tmp.path().join(EXPORT_FILE_NAME));

    mgr.delete_bookmark("https://saved.com", "dev").unwrap();
    mgr.import_file(&path).unwrap();
    assert_eq!(*mgr.data(), before);
}

#[test]
fn test_import_missing_file() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let (_storage, mut mgr) = setup();
    assert!(matches!(
        mgr.import_file(&tmp.path().join("absent.json")),
        Err(BookmarkError::IoError(_))
    ));
}

/// A stored document with a broken shape is replaced by the built-in default.
#[test]
fn test_invalid_stored_document_falls_back_to_default() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let storage = Storage::new(Rc::new(db));
    storage.save(StorageKey::Bookmarks, &json!({"folders": "broken"}));

    let mgr = BookmarkManager::new(storage);
    assert_eq!(*mgr.data(), BookmarkData::default());
}

/// The built-in document has two folders and two unorganized bookmarks.
#[test]
fn test_default_document_contents() {
    let data = BookmarkData::default();
    let ids: Vec<&str> = data.folders.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["dev", "entertainment"]);
    assert_eq!(data.unorganized.len(), 2);
    assert_eq!(data.bookmark_count(), 8);
}

/// Helper: make every later write through `storage` fail.
fn break_storage(storage: &Storage) {
    storage
        .database()
        .connection()
        .execute("DROP TABLE kv_store", [])
        .unwrap();
}

/// A failed write is reported with the bookmarks key; the added bookmark is
/// still in memory.
#[test]
fn test_add_persistence_failure_keeps_change() {
    let (storage, mut mgr) = setup();
    break_storage(&storage);

    let result = mgr.add_bookmark("Unsaved", "unsaved.com", "dev", None);

    assert_eq!(
        result,
        Err(BookmarkError::PersistenceFailed("bookmarksData".to_string()))
    );
    assert!(mgr.find_bookmark("https://unsaved.com", "dev").is_some());
}

/// Deleting a missing bookmark only fails when the write itself fails.
#[test]
fn test_delete_fails_only_on_persistence_failure() {
    let (storage, mut mgr) = setup();
    assert!(mgr.delete_bookmark("https://nothing.com", "dev").is_ok());

    break_storage(&storage);
    assert_eq!(
        mgr.delete_bookmark("https://nothing.com", "dev"),
        Err(BookmarkError::PersistenceFailed("bookmarksData".to_string()))
    );
}
