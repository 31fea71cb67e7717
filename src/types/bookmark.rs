use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved container id for bookmarks held outside any folder.
pub const UNORGANIZED: &str = "unorganized";

/// Represents a saved bookmark. Identified within its container by `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Bookmark {
    pub fn new(name: &str, url: &str, image: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            image: image.map(str::to_string),
        }
    }
}

/// A named, uniquely identified container of bookmarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    #[serde(default)]
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl Folder {
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            bookmarks: Vec::new(),
        }
    }
}

/// Root bookmark document: every folder plus the unorganized list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkData {
    pub folders: Vec<Folder>,
    pub unorganized: Vec<Bookmark>,
}

impl Default for BookmarkData {
    fn default() -> Self {
        let folder = |name: &str, id: &str, bookmarks: &[(&str, &str)]| Folder {
            name: name.to_string(),
            id: id.to_string(),
            bookmarks: bookmarks
                .iter()
                .map(|(name, url)| Bookmark::new(name, url, None))
                .collect(),
        };

        Self {
            folders: vec![
                folder(
                    "Development",
                    "dev",
                    &[
                        ("GitHub", "https://github.com"),
                        ("Stack Overflow", "https://stackoverflow.com"),
                        ("MDN Web Docs", "https://developer.mozilla.org"),
                    ],
                ),
                folder(
                    "Entertainment",
                    "entertainment",
                    &[
                        ("YouTube", "https://www.youtube.com"),
                        ("Netflix", "https://www.netflix.com"),
                        ("Spotify", "https://www.spotify.com"),
                    ],
                ),
            ],
            unorganized: vec![
                Bookmark::new("Google", "https://www.google.com", None),
                Bookmark::new("Wikipedia", "https://www.wikipedia.org", None),
            ],
        }
    }
}

impl BookmarkData {
    /// An empty document with no folders and no unorganized bookmarks.
    pub fn empty() -> Self {
        Self {
            folders: Vec::new(),
            unorganized: Vec::new(),
        }
    }

    /// Checks the top-level shape of a raw document.
    ///
    /// Both `folders` and `unorganized` must be present and be arrays.
    pub fn validate_shape(value: &Value) -> Result<(), String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "document is not an object".to_string())?;
        for field in ["folders", "unorganized"] {
            match obj.get(field) {
                Some(Value::Array(_)) => {}
                Some(_) => return Err(format!("'{}' is not an array", field)),
                None => return Err(format!("missing '{}'", field)),
            }
        }
        Ok(())
    }

    /// Validates the shape of a raw document and converts it to the typed tree.
    pub fn from_value(value: Value) -> Result<Self, String> {
        Self::validate_shape(&value)?;
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Total number of bookmarks across every folder and the unorganized list.
    pub fn bookmark_count(&self) -> usize {
        self.unorganized.len() + self.folders.iter().map(|f| f.bookmarks.len()).sum::<usize>()
    }
}

/// Location of a bookmark found by URL within a container.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkMatch<'a> {
    pub bookmark: &'a Bookmark,
    /// `None` when the bookmark lives in the unorganized list.
    pub folder: Option<&'a Folder>,
    pub folder_index: Option<usize>,
    pub bookmark_index: usize,
}

/// A search hit together with the id of the container holding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkHit {
    pub folder_id: String,
    pub bookmark: Bookmark,
}
