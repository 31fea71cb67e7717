//! Widget Manager for App Shelf.
//!
//! Keeps the flat list of dashboard widgets (sticky notes and todo lists),
//! independent of the bookmark tree. Every mutation persists the full list.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;
use uuid::Uuid;

use crate::services::storage::{Storage, StorageKey};
use crate::types::errors::WidgetError;
use crate::types::widget::{
    ContentPatch, NewWidget, TodoItem, Widget, WidgetData, WidgetPatch, WidgetPosition,
};

/// Trait defining widget management operations.
pub trait WidgetManagerTrait {
    fn add_widget(&mut self, widget: NewWidget) -> Result<String, WidgetError>;
    fn update_widget(&mut self, id: &str, patch: WidgetPatch) -> Result<(), WidgetError>;
    fn update_widget_content(&mut self, id: &str, patch: ContentPatch) -> Result<(), WidgetError>;
    fn delete_widget(&mut self, id: &str) -> Result<(), WidgetError>;
    fn get_widget(&self, id: &str) -> Option<&Widget>;
    fn list_widgets(&self) -> &[Widget];
    fn list_by_position(&self, position: WidgetPosition) -> Vec<&Widget>;
}

pub struct WidgetManager {
    storage: Storage,
    widgets: Vec<Widget>,
}

impl WidgetManager {
    pub fn new(storage: Storage) -> Self {
        let widgets = storage.load(StorageKey::Widgets, Vec::new());
        Self { storage, widgets }
    }

    fn now_millis() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    }

    /// `widget_<unix millis>`, bumped forward until no existing widget uses it.
    fn next_widget_id(&self) -> String {
        let mut millis = Self::now_millis();
        loop {
            let id = format!("widget_{}", millis);
            if self.widgets.iter().all(|w| w.id != id) {
                return id;
            }
            millis += 1;
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, WidgetError> {
        self.widgets
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WidgetError::NotFound(id.to_string()))
    }

    fn save(&self) -> Result<(), WidgetError> {
        if self.storage.save(StorageKey::Widgets, &self.widgets) {
            Ok(())
        } else {
            Err(WidgetError::PersistenceFailed(
                StorageKey::Widgets.as_str().to_string(),
            ))
        }
    }

    fn todo_items(&self, widget_id: &str) -> Result<Vec<TodoItem>, WidgetError> {
        let widget = &self.widgets[self.index_of(widget_id)?];
        match &widget.data {
            WidgetData::Todo(todo) => Ok(todo.items.clone()),
            WidgetData::Note(_) => Err(WidgetError::ContentMismatch(format!(
                "widget {} is not a todo list",
                widget_id
            ))),
        }
    }

    fn replace_items(&mut self, widget_id: &str, items: Vec<TodoItem>) -> Result<(), WidgetError> {
        self.update_widget_content(
            widget_id,
            ContentPatch {
                items: Some(items),
                ..ContentPatch::default()
            },
        )
    }

    /// Appends an uncompleted item to a todo widget and returns its id.
    pub fn add_todo_item(&mut self, widget_id: &str, text: &str) -> Result<String, WidgetError> {
        let mut items = self.todo_items(widget_id)?;
        let item_id = format!("todo_{}", Uuid::new_v4().simple());
        items.push(TodoItem {
            id: item_id.clone(),
            text: text.to_string(),
            completed: false,
        });
        self.replace_items(widget_id, items)?;
        Ok(item_id)
    }

    pub fn toggle_todo_item(
        &mut self,
        widget_id: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<(), WidgetError> {
        let mut items = self.todo_items(widget_id)?;
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| WidgetError::ItemNotFound(item_id.to_string()))?;
        item.completed = completed;
        self.replace_items(widget_id, items)
    }

    pub fn remove_todo_item(&mut self, widget_id: &str, item_id: &str) -> Result<(), WidgetError> {
        let mut items = self.todo_items(widget_id)?;
        let before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == before {
            return Err(WidgetError::ItemNotFound(item_id.to_string()));
        }
        self.replace_items(widget_id, items)
    }
}

impl WidgetManagerTrait for WidgetManager {
    /// Creates a widget with the type's default title and empty payload.
    fn add_widget(&mut self, widget: NewWidget) -> Result<String, WidgetError> {
        let id = self.next_widget_id();
        let title = widget
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| widget.kind.default_title().to_string());

        self.widgets.push(Widget {
            id: id.clone(),
            kind: widget.kind,
            position: WidgetPosition::Left,
            title,
            data: widget.kind.default_data(),
        });
        debug!(%id, kind = ?widget.kind, "widget added");
        self.save()?;
        Ok(id)
    }

    /// Overwrites the top-level fields present in `patch`.
    fn update_widget(&mut self, id: &str, patch: WidgetPatch) -> Result<(), WidgetError> {
        let index = self.index_of(id)?;
        let widget = &mut self.widgets[index];
        if let Some(title) = patch.title {
            widget.title = title;
        }
        if let Some(position) = patch.position {
            widget.position = position;
        }
        self.save()
    }

    /// Overwrites the payload fields present in `patch`.
    ///
    /// A field belonging to the other widget type is rejected without changes.
    fn update_widget_content(&mut self, id: &str, patch: ContentPatch) -> Result<(), WidgetError> {
        let index = self.index_of(id)?;
        let widget = &mut self.widgets[index];
        match &mut widget.data {
            WidgetData::Note(note) => {
                if patch.items.is_some() {
                    return Err(WidgetError::ContentMismatch(format!(
                        "note widget {} has no items",
                        id
                    )));
                }
                if let Some(content) = patch.content {
                    note.content = content;
                }
            }
            WidgetData::Todo(todo) => {
                if patch.content.is_some() {
                    return Err(WidgetError::ContentMismatch(format!(
                        "todo widget {} has no content",
                        id
                    )));
                }
                if let Some(items) = patch.items {
                    todo.items = items;
                }
            }
        }
        self.save()
    }

    fn delete_widget(&mut self, id: &str) -> Result<(), WidgetError> {
        let index = self.index_of(id)?;
        self.widgets.remove(index);
        debug!(id, "widget deleted");
        self.save()
    }

    fn get_widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn list_widgets(&self) -> &[Widget] {
        &self.widgets
    }

    fn list_by_position(&self, position: WidgetPosition) -> Vec<&Widget> {
        self.widgets.iter().filter(|w| w.position == position).collect()
    }
}
