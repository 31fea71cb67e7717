//! Bookmark Manager for App Shelf.
//!
//! Implements `BookmarkManagerTrait`: add, find, update, delete, search,
//! import and export over the in-memory bookmark tree. Every mutation is
//! written back through the [`Storage`] adapter before returning.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::services::storage::{Storage, StorageKey};
use crate::types::bookmark::{Bookmark, BookmarkData, BookmarkHit, BookmarkMatch, Folder, UNORGANIZED};
use crate::types::errors::BookmarkError;

/// File name offered for exported bookmark documents.
pub const EXPORT_FILE_NAME: &str = "bookmarks.json";

/// Default favicon edge length in pixels.
pub const DEFAULT_FAVICON_SIZE: u32 = 128;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn data(&self) -> &BookmarkData;
    fn add_bookmark(
        &mut self,
        name: &str,
        url: &str,
        folder_id: &str,
        image: Option<&str>,
    ) -> Result<(), BookmarkError>;
    fn find_bookmark(&self, url: &str, folder_id: &str) -> Option<BookmarkMatch<'_>>;
    fn update_bookmark(
        &mut self,
        original_url: &str,
        original_folder_id: &str,
        updated: Bookmark,
        new_folder_id: &str,
    ) -> Result<(), BookmarkError>;
    fn delete_bookmark(&mut self, url: &str, folder_id: &str) -> Result<(), BookmarkError>;
    fn bookmarks_in(&self, folder_id: &str) -> Result<&[Bookmark], BookmarkError>;
    fn search_bookmarks(&self, term: &str) -> Vec<BookmarkHit>;
    fn export_json(&self) -> Result<String, BookmarkError>;
    fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, BookmarkError>;
    fn import_bookmarks(&mut self, document: Value) -> Result<(), BookmarkError>;
    fn import_json(&mut self, text: &str) -> Result<(), BookmarkError>;
    fn import_file(&mut self, path: &Path) -> Result<(), BookmarkError>;
}

/// Exclusive owner of the bookmark document.
pub struct BookmarkManager {
    storage: Storage,
    data: BookmarkData,
}

/// Prefixes `https://` unless the URL already starts with `http://` or `https://`.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Extracts the host of `url`, returning `url` unchanged if it cannot be parsed.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => url.to_string(),
        },
        Err(e) => {
            debug!(url, error = %e, "could not extract domain");
            url.to_string()
        }
    }
}

/// Builds the favicon image URL for a bookmark.
pub fn favicon_url(url: &str, size: u32) -> String {
    format!(
        "https://www.google.com/s2/favicons?domain={}&sz={}",
        extract_domain(url),
        size
    )
}

impl BookmarkManager {
    /// Creates a manager holding whatever [`BookmarkManager::load`] returns.
    pub fn new(storage: Storage) -> Self {
        let data = Self::load(&storage);
        Self { storage, data }
    }

    /// Loads the stored document, substituting the built-in default if it is
    /// missing or fails shape validation.
    pub fn load(storage: &Storage) -> BookmarkData {
        let raw = storage.load(StorageKey::Bookmarks, Value::Null);
        if raw.is_null() {
            return BookmarkData::default();
        }
        match BookmarkData::from_value(raw) {
            Ok(data) => data,
            Err(reason) => {
                warn!(%reason, "stored bookmarks are invalid, using defaults");
                BookmarkData::default()
            }
        }
    }

    /// Writes the whole document through the storage adapter.
    pub fn save(&self) -> Result<(), BookmarkError> {
        if self.storage.save(StorageKey::Bookmarks, &self.data) {
            Ok(())
        } else {
            Err(BookmarkError::PersistenceFailed(
                StorageKey::Bookmarks.as_str().to_string(),
            ))
        }
    }

    fn folder_index(&self, folder_id: &str) -> Option<usize> {
        self.data.folders.iter().position(|f| f.id == folder_id)
    }

    /// Returns the mutable list for a container id, if it resolves.
    fn container_mut(&mut self, folder_id: &str) -> Option<&mut Vec<Bookmark>> {
        if folder_id == UNORGANIZED {
            return Some(&mut self.data.unorganized);
        }
        self.data
            .folders
            .iter_mut()
            .find(|f| f.id == folder_id)
            .map(|f| &mut f.bookmarks)
    }

    fn container_exists(&self, folder_id: &str) -> bool {
        folder_id == UNORGANIZED || self.folder_index(folder_id).is_some()
    }

    // --- Folder accessors used by FolderManager ---

    pub(crate) fn folders(&self) -> &[Folder] {
        &self.data.folders
    }

    pub(crate) fn folder_mut(&mut self, index: usize) -> Option<&mut Folder> {
        self.data.folders.get_mut(index)
    }

    pub(crate) fn push_folder(&mut self, folder: Folder) {
        self.data.folders.push(folder);
    }

    pub(crate) fn remove_folder(&mut self, index: usize) -> Folder {
        self.data.folders.remove(index)
    }

    pub(crate) fn append_unorganized(&mut self, bookmarks: Vec<Bookmark>) {
        self.data.unorganized.extend(bookmarks);
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    fn data(&self) -> &BookmarkData {
        &self.data
    }

    /// Appends a bookmark to a folder, or to the unorganized list when
    /// `folder_id` is [`UNORGANIZED`].
    fn add_bookmark(
        &mut self,
        name: &str,
        url: &str,
        folder_id: &str,
        image: Option<&str>,
    ) -> Result<(), BookmarkError> {
        let bookmark = Bookmark::new(name, &normalize_url(url), image);
        let container = self
            .container_mut(folder_id)
            .ok_or_else(|| BookmarkError::FolderNotFound(folder_id.to_string()))?;
        container.push(bookmark);
        debug!(folder_id, url, "bookmark added");
        self.save()
    }

    /// Finds the first bookmark with exactly `url` in the named container.
    fn find_bookmark(&self, url: &str, folder_id: &str) -> Option<BookmarkMatch<'_>> {
        if folder_id == UNORGANIZED {
            let bookmark_index = self.data.unorganized.iter().position(|b| b.url == url)?;
            return Some(BookmarkMatch {
                bookmark: &self.data.unorganized[bookmark_index],
                folder: None,
                folder_index: None,
                bookmark_index,
            });
        }

        let folder_index = self.folder_index(folder_id)?;
        let folder = &self.data.folders[folder_index];
        let bookmark_index = folder.bookmarks.iter().position(|b| b.url == url)?;
        Some(BookmarkMatch {
            bookmark: &folder.bookmarks[bookmark_index],
            folder: Some(folder),
            folder_index: Some(folder_index),
            bookmark_index,
        })
    }

    /// Replaces a bookmark and moves it to `new_folder_id` (appended at the end).
    ///
    /// The destination is checked before anything is removed, so an invalid
    /// target leaves the original bookmark where it was.
    fn update_bookmark(
        &mut self,
        original_url: &str,
        original_folder_id: &str,
        updated: Bookmark,
        new_folder_id: &str,
    ) -> Result<(), BookmarkError> {
        if !self.container_exists(new_folder_id) {
            return Err(BookmarkError::FolderNotFound(new_folder_id.to_string()));
        }

        let source = self
            .container_mut(original_folder_id)
            .ok_or_else(|| BookmarkError::FolderNotFound(original_folder_id.to_string()))?;
        let index = source
            .iter()
            .position(|b| b.url == original_url)
            .ok_or_else(|| BookmarkError::NotFound(original_url.to_string()))?;
        source.remove(index);

        let bookmark = Bookmark {
            url: normalize_url(&updated.url),
            ..updated
        };
        if let Some(destination) = self.container_mut(new_folder_id) {
            destination.push(bookmark);
        }
        debug!(original_url, original_folder_id, new_folder_id, "bookmark updated");
        self.save()
    }

    /// Removes the first bookmark with `url` from the named container.
    ///
    /// A missing bookmark or container is not an error; the document is still
    /// persisted and only an adapter failure is reported.
    fn delete_bookmark(&mut self, url: &str, folder_id: &str) -> Result<(), BookmarkError> {
        if let Some(container) = self.container_mut(folder_id) {
            if let Some(index) = container.iter().position(|b| b.url == url) {
                container.remove(index);
                debug!(folder_id, url, "bookmark deleted");
            }
        }
        self.save()
    }

    fn bookmarks_in(&self, folder_id: &str) -> Result<&[Bookmark], BookmarkError> {
        if folder_id == UNORGANIZED {
            return Ok(&self.data.unorganized);
        }
        self.data
            .folders
            .iter()
            .find(|f| f.id == folder_id)
            .map(|f| f.bookmarks.as_slice())
            .ok_or_else(|| BookmarkError::FolderNotFound(folder_id.to_string()))
    }

    /// Case-insensitive substring match on name or URL, in document order
    /// (folders first, then unorganized). The term is matched as given,
    /// surrounding whitespace included.
    fn search_bookmarks(&self, term: &str) -> Vec<BookmarkHit> {
        let term = term.to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        let is_hit = |b: &Bookmark| {
            b.name.to_lowercase().contains(&term) || b.url.to_lowercase().contains(&term)
        };

        let in_folders = self.data.folders.iter().flat_map(|folder| {
            folder.bookmarks.iter().map(move |b| (folder.id.as_str(), b))
        });
        let in_unorganized = self.data.unorganized.iter().map(|b| (UNORGANIZED, b));

        in_folders
            .chain(in_unorganized)
            .filter(|(_, b)| is_hit(b))
            .map(|(folder_id, b)| BookmarkHit {
                folder_id: folder_id.to_string(),
                bookmark: b.clone(),
            })
            .collect()
    }

    /// Serializes the full document as indented JSON.
    fn export_json(&self) -> Result<String, BookmarkError> {
        serde_json::to_string_pretty(&self.data)
            .map_err(|e| BookmarkError::InvalidData(format!("Failed to serialize bookmarks: {}", e)))
    }

    /// Writes `bookmarks.json` into `dir` and returns its path.
    fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, BookmarkError> {
        let json = self.export_json()?;
        fs::create_dir_all(dir)
            .map_err(|e| BookmarkError::IoError(format!("Failed to create export directory: {}", e)))?;
        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, json)
            .map_err(|e| BookmarkError::IoError(format!("Failed to write export file: {}", e)))?;
        info!(path = %path.display(), "bookmarks exported");
        Ok(path)
    }

    /// Replaces the whole document if `document` passes shape validation.
    fn import_bookmarks(&mut self, document: Value) -> Result<(), BookmarkError> {
        let data = BookmarkData::from_value(document).map_err(|reason| {
            warn!(%reason, "rejected bookmark import");
            BookmarkError::InvalidData(reason)
        })?;
        self.data = data;
        info!(bookmarks = self.data.bookmark_count(), "bookmarks imported");
        self.save()
    }

    fn import_json(&mut self, text: &str) -> Result<(), BookmarkError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| BookmarkError::InvalidData(format!("Failed to parse bookmarks file: {}", e)))?;
        self.import_bookmarks(document)
    }

    fn import_file(&mut self, path: &Path) -> Result<(), BookmarkError> {
        let text = fs::read_to_string(path)
            .map_err(|e| BookmarkError::IoError(format!("Failed to read bookmarks file: {}", e)))?;
        self.import_json(&text)
    }
}
