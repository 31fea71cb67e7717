//! Folder Manager for App Shelf.
//!
//! Owns folder identity (add, rename, delete) on top of the bookmark tree.
//! It borrows the [`BookmarkManager`] that owns the tree and routes every
//! change through its accessors, so the tree keeps a single owner.

use tracing::debug;

use crate::managers::bookmark_manager::BookmarkManager;
use crate::types::bookmark::{Folder, UNORGANIZED};
use crate::types::errors::{BookmarkError, FolderError};

/// Trait defining folder management operations.
pub trait FolderManagerTrait {
    fn list_folders(&self) -> &[Folder];
    fn find_folder(&self, id: &str) -> Option<(&Folder, usize)>;
    fn add_folder(&mut self, name: &str, id: &str) -> Result<(), FolderError>;
    fn update_folder(&mut self, original_id: &str, name: &str, id: &str) -> Result<(), FolderError>;
    fn delete_folder(&mut self, id: &str) -> Result<(), FolderError>;
    fn move_to_unorganized_then_delete(&mut self, id: &str) -> Result<(), FolderError>;
}

/// Folder manager borrowing the bookmark manager that owns the tree.
pub struct FolderManager<'a> {
    bookmarks: &'a mut BookmarkManager,
}

impl<'a> FolderManager<'a> {
    pub fn new(bookmarks: &'a mut BookmarkManager) -> Self {
        Self { bookmarks }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.bookmarks.folders().iter().position(|f| f.id == id)
    }

    fn persist(&self) -> Result<(), FolderError> {
        self.bookmarks.save().map_err(|e| match e {
            BookmarkError::PersistenceFailed(key) => FolderError::PersistenceFailed(key),
            other => FolderError::PersistenceFailed(other.to_string()),
        })
    }

    /// Trims `name` and `id` and rejects empty values or the reserved id.
    fn validated<'s>(name: &'s str, id: &'s str) -> Result<(&'s str, &'s str), FolderError> {
        let (name, id) = (name.trim(), id.trim());
        if name.is_empty() {
            return Err(FolderError::EmptyField("name".to_string()));
        }
        if id.is_empty() {
            return Err(FolderError::EmptyField("id".to_string()));
        }
        if id == UNORGANIZED {
            return Err(FolderError::ReservedId(id.to_string()));
        }
        Ok((name, id))
    }
}

impl<'a> FolderManagerTrait for FolderManager<'a> {
    fn list_folders(&self) -> &[Folder] {
        self.bookmarks.folders()
    }

    /// Looks up a folder by id. The unorganized list is never returned here.
    fn find_folder(&self, id: &str) -> Option<(&Folder, usize)> {
        if id == UNORGANIZED {
            return None;
        }
        let index = self.index_of(id)?;
        Some((&self.bookmarks.folders()[index], index))
    }

    /// Appends an empty folder. Fails if `id` is already taken.
    fn add_folder(&mut self, name: &str, id: &str) -> Result<(), FolderError> {
        let (name, id) = Self::validated(name, id)?;
        if self.index_of(id).is_some() {
            return Err(FolderError::DuplicateId(id.to_string()));
        }
        self.bookmarks.push_folder(Folder::new(name, id));
        debug!(id, "folder added");
        self.persist()
    }

    /// Renames a folder in place, keeping its bookmarks and position.
    fn update_folder(&mut self, original_id: &str, name: &str, id: &str) -> Result<(), FolderError> {
        let (name, id) = Self::validated(name, id)?;
        if id != original_id && self.index_of(id).is_some() {
            return Err(FolderError::DuplicateId(id.to_string()));
        }
        let index = self
            .find_folder(original_id)
            .map(|(_, index)| index)
            .ok_or_else(|| FolderError::NotFound(original_id.to_string()))?;

        if let Some(folder) = self.bookmarks.folder_mut(index) {
            folder.name = name.to_string();
            folder.id = id.to_string();
        }
        debug!(original_id, id, "folder updated");
        self.persist()
    }

    /// Removes a folder together with its bookmarks.
    fn delete_folder(&mut self, id: &str) -> Result<(), FolderError> {
        let index = self
            .find_folder(id)
            .map(|(_, index)| index)
            .ok_or_else(|| FolderError::NotFound(id.to_string()))?;
        let removed = self.bookmarks.remove_folder(index);
        debug!(id, discarded = removed.bookmarks.len(), "folder deleted");
        self.persist()
    }

    /// Appends the folder's bookmarks to the unorganized list, then removes it.
    fn move_to_unorganized_then_delete(&mut self, id: &str) -> Result<(), FolderError> {
        let index = self
            .find_folder(id)
            .map(|(_, index)| index)
            .ok_or_else(|| FolderError::NotFound(id.to_string()))?;
        let removed = self.bookmarks.remove_folder(index);
        debug!(id, moved = removed.bookmarks.len(), "folder emptied into unorganized");
        self.bookmarks.append_unorganized(removed.bookmarks);
        self.persist()
    }
}
