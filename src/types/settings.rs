use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User preferences persisted under the settings key.
///
/// Serialized with the camelCase field names the new-tab page has always
/// stored (`bookmarkTarget`, `searchEngine`, `expandedFolders`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub bookmark_target: BookmarkTarget,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    #[serde(default)]
    pub expanded_folders: FolderExpansion,
}

fn default_search_engine() -> String {
    "google".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bookmark_target: BookmarkTarget::default(),
            search_engine: default_search_engine(),
            expanded_folders: FolderExpansion::default(),
        }
    }
}

/// Where a clicked bookmark opens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkTarget {
    #[default]
    New,
    Current,
}

impl BookmarkTarget {
    /// The HTML anchor target for this preference.
    pub fn link_target(&self) -> &'static str {
        match self {
            BookmarkTarget::New => "_blank",
            BookmarkTarget::Current => "_self",
        }
    }
}

/// Per-folder expand/collapse state.
///
/// Stored as `null` for [`FolderExpansion::AllExpanded`] and as an array of
/// folder ids otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub enum FolderExpansion {
    /// No folder has been toggled yet; every folder counts as expanded.
    #[default]
    AllExpanded,
    /// Only the listed folders are expanded.
    Explicit(BTreeSet<String>),
}

impl From<Option<Vec<String>>> for FolderExpansion {
    fn from(ids: Option<Vec<String>>) -> Self {
        match ids {
            None => FolderExpansion::AllExpanded,
            Some(ids) => FolderExpansion::Explicit(ids.into_iter().collect()),
        }
    }
}

impl From<FolderExpansion> for Option<Vec<String>> {
    fn from(expansion: FolderExpansion) -> Self {
        match expansion {
            FolderExpansion::AllExpanded => None,
            FolderExpansion::Explicit(ids) => Some(ids.into_iter().collect()),
        }
    }
}

impl FolderExpansion {
    pub fn is_expanded(&self, folder_id: &str) -> bool {
        match self {
            FolderExpansion::AllExpanded => true,
            FolderExpansion::Explicit(ids) => ids.contains(folder_id),
        }
    }

    /// Marks a folder expanded. Returns `true` if the state changed.
    pub fn expand(&mut self, folder_id: &str) -> bool {
        match self {
            FolderExpansion::AllExpanded => {
                *self = FolderExpansion::Explicit(BTreeSet::from([folder_id.to_string()]));
                true
            }
            FolderExpansion::Explicit(ids) => ids.insert(folder_id.to_string()),
        }
    }

    /// Marks a folder collapsed. Returns `true` if the state changed.
    ///
    /// Collapsing from `AllExpanded` starts from an empty set, so every other
    /// folder also reads as collapsed afterwards.
    pub fn collapse(&mut self, folder_id: &str) -> bool {
        match self {
            FolderExpansion::AllExpanded => {
                *self = FolderExpansion::Explicit(BTreeSet::new());
                true
            }
            FolderExpansion::Explicit(ids) => ids.remove(folder_id),
        }
    }
}

/// Keys recognized by the generic settings get/set interface.
pub const SETTING_KEYS: [&str; 3] = ["bookmarkTarget", "searchEngine", "expandedFolders"];
