use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A small dashboard panel persisted independently of the bookmark tree.
///
/// On load the payload in `data` is read as the shape named by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredWidget")]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub position: WidgetPosition,
    pub title: String,
    pub data: WidgetData,
}

#[derive(Deserialize)]
struct StoredWidget {
    id: String,
    #[serde(rename = "type")]
    kind: WidgetKind,
    #[serde(default)]
    position: WidgetPosition,
    title: String,
    data: Value,
}

impl TryFrom<StoredWidget> for Widget {
    type Error = String;

    fn try_from(stored: StoredWidget) -> Result<Self, Self::Error> {
        let StoredWidget {
            id,
            kind,
            position,
            title,
            data,
        } = stored;
        let data = match kind {
            WidgetKind::Note => serde_json::from_value(data).map(WidgetData::Note),
            WidgetKind::Todo => serde_json::from_value(data).map(WidgetData::Todo),
        }
        .map_err(|e| format!("invalid data for widget {}: {}", id, e))?;

        Ok(Self {
            id,
            kind,
            position,
            title,
            data,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Note,
    Todo,
}

impl WidgetKind {
    pub fn default_title(&self) -> &'static str {
        match self {
            WidgetKind::Note => "Sticky Note",
            WidgetKind::Todo => "Todo List",
        }
    }

    pub fn default_data(&self) -> WidgetData {
        match self {
            WidgetKind::Note => WidgetData::Note(NoteData::default()),
            WidgetKind::Todo => WidgetData::Todo(TodoData::default()),
        }
    }
}

/// Which side of the page a widget is docked to. New widgets always go left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetPosition {
    #[default]
    Left,
    Right,
}

/// Type-specific widget payload. Written without a tag; [`Widget`] picks the
/// variant from its `type` when reading.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WidgetData {
    Note(NoteData),
    Todo(TodoData),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NoteData {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TodoData {
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Fields accepted when creating a widget.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWidget {
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub title: Option<String>,
}

/// Top-level fields to shallow-merge into a widget. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetPatch {
    pub title: Option<String>,
    pub position: Option<WidgetPosition>,
}

/// Payload fields to shallow-merge into a widget's `data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentPatch {
    pub content: Option<String>,
    pub items: Option<Vec<TodoItem>>,
}
