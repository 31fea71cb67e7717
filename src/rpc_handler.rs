//! RPC method handler for the App Shelf JSON-RPC bridge.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested directly.
//! `handle_method` dispatches a method call from the new-tab page to the
//! stores held by [`App`].

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::{favicon_url, BookmarkManagerTrait};
use crate::managers::folder_manager::FolderManagerTrait;
use crate::managers::widget_manager::WidgetManagerTrait;
use crate::services::settings_engine::{search_url, SettingsEngineTrait};
use crate::types::bookmark::{Bookmark, UNORGANIZED};
use crate::types::search::SEARCH_ENGINES;
use crate::types::widget::{ContentPatch, NewWidget, WidgetPatch, WidgetPosition};

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn folder_param(params: &Value) -> &str {
    params
        .get("folder_id")
        .and_then(|v| v.as_str())
        .unwrap_or(UNORGANIZED)
}

fn typed_param<T: serde::de::DeserializeOwned>(params: &Value, name: &str) -> Result<T, String> {
    let raw = params.get(name).cloned().ok_or_else(|| format!("missing {}", name))?;
    serde_json::from_value(raw).map_err(|e| format!("invalid {}: {}", name, e))
}

/// Dispatch a JSON-RPC method call to the appropriate store.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.list" => Ok(json!(app.bookmarks.data())),
        "bookmark.add" => {
            let name = str_param(params, "name")?;
            let url = str_param(params, "url")?;
            let image = params.get("image").and_then(|v| v.as_str());
            app.bookmarks
                .add_bookmark(name, url, folder_param(params), image)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.find" => {
            let url = str_param(params, "url")?;
            match app.bookmarks.find_bookmark(url, folder_param(params)) {
                Some(found) => Ok(json!({
                    "bookmark": found.bookmark,
                    "folder_id": found.folder.map(|f| f.id.as_str()).unwrap_or(UNORGANIZED),
                    "folder_index": found.folder_index,
                    "bookmark_index": found.bookmark_index,
                })),
                None => Ok(Value::Null),
            }
        }
        "bookmark.update" => {
            let original_url = str_param(params, "original_url")?;
            let original_folder = str_param(params, "original_folder_id")?;
            let bookmark: Bookmark = typed_param(params, "bookmark")?;
            let new_folder = str_param(params, "folder_id")?;
            app.bookmarks
                .update_bookmark(original_url, original_folder, bookmark, new_folder)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.delete" => {
            let url = str_param(params, "url")?;
            app.bookmarks
                .delete_bookmark(url, folder_param(params))
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            Ok(json!(app.bookmarks.search_bookmarks(query)))
        }
        "bookmark.export" => {
            let text = app.bookmarks.export_json().map_err(|e| e.to_string())?;
            Ok(json!({"file_name": crate::managers::bookmark_manager::EXPORT_FILE_NAME, "content": text}))
        }
        "bookmark.import" => {
            let document = params
                .get("document")
                .cloned()
                .ok_or("missing document")?;
            app.bookmarks
                .import_bookmarks(document)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.favicon" => {
            let url = str_param(params, "url")?;
            let size = match params.get("size") {
                Some(raw) => raw
                    .as_u64()
                    .and_then(|s| u32::try_from(s).ok())
                    .filter(|s| *s > 0)
                    .ok_or_else(|| format!("invalid size: {}", raw))?,
                None => app.config.favicon_size,
            };
            Ok(json!({"url": favicon_url(url, size)}))
        }

        // ─── Folders ───
        "folder.list" => Ok(json!(app.folders().list_folders())),
        "folder.add" => {
            let name = str_param(params, "name")?;
            let id = str_param(params, "id")?;
            app.folders().add_folder(name, id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "folder.update" => {
            let original_id = str_param(params, "original_id")?;
            let name = str_param(params, "name")?;
            let id = str_param(params, "id")?;
            app.folders()
                .update_folder(original_id, name, id)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "folder.delete" => {
            let id = str_param(params, "id")?;
            let keep = params
                .get("keep_bookmarks")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let mut folders = app.folders();
            let result = if keep {
                folders.move_to_unorganized_then_delete(id)
            } else {
                folders.delete_folder(id)
            };
            result.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get_all" => Ok(json!(app.settings.get_settings())),
        "settings.get" => {
            let key = str_param(params, "key")?;
            let default = params.get("default").cloned().unwrap_or(Value::Null);
            Ok(app.settings.get_value_or(key, default))
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.dark_mode" => Ok(json!({"enabled": app.settings.is_dark_mode()})),
        "settings.toggle_dark_mode" => Ok(json!({"enabled": app.settings.toggle_dark_mode()})),
        "settings.set_dark_mode" => {
            let enabled = params
                .get("enabled")
                .and_then(|v| v.as_bool())
                .ok_or("missing enabled")?;
            app.settings.set_dark_mode(enabled).map_err(|e| e.to_string())?;
            Ok(json!({"enabled": enabled}))
        }
        "settings.link_target" => {
            Ok(json!({"target": app.settings.bookmark_target().link_target()}))
        }
        "settings.is_expanded" => {
            let id = str_param(params, "id")?;
            Ok(json!({"expanded": app.settings.is_folder_expanded(id)}))
        }
        "settings.expand" => {
            let id = str_param(params, "id")?;
            app.settings.expand_folder(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.collapse" => {
            let id = str_param(params, "id")?;
            app.settings.collapse_folder(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Widgets ───
        "widget.list" => match params.get("position") {
            Some(position) => {
                let position: WidgetPosition = serde_json::from_value(position.clone())
                    .map_err(|e| format!("invalid position: {}", e))?;
                Ok(json!(app.widgets.list_by_position(position)))
            }
            None => Ok(json!(app.widgets.list_widgets())),
        },
        "widget.get" => {
            let id = str_param(params, "id")?;
            Ok(json!(app.widgets.get_widget(id)))
        }
        "widget.add" => {
            let widget: NewWidget =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid widget: {}", e))?;
            let id = app.widgets.add_widget(widget).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "widget.update" => {
            let id = str_param(params, "id")?;
            let patch: WidgetPatch = typed_param(params, "fields")?;
            app.widgets.update_widget(id, patch).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "widget.update_content" => {
            let id = str_param(params, "id")?;
            let patch: ContentPatch = typed_param(params, "content")?;
            app.widgets
                .update_widget_content(id, patch)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "widget.delete" => {
            let id = str_param(params, "id")?;
            app.widgets.delete_widget(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "widget.todo_add" => {
            let id = str_param(params, "id")?;
            let text = str_param(params, "text")?;
            let item_id = app.widgets.add_todo_item(id, text).map_err(|e| e.to_string())?;
            Ok(json!({"item_id": item_id}))
        }
        "widget.todo_toggle" => {
            let id = str_param(params, "id")?;
            let item_id = str_param(params, "item_id")?;
            let completed = params
                .get("completed")
                .and_then(|v| v.as_bool())
                .ok_or("missing completed")?;
            app.widgets
                .toggle_todo_item(id, item_id, completed)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "widget.todo_remove" => {
            let id = str_param(params, "id")?;
            let item_id = str_param(params, "item_id")?;
            app.widgets
                .remove_todo_item(id, item_id)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Search ───
        "search.engines" => Ok(json!(SEARCH_ENGINES)),
        "search.url" => {
            let term = str_param(params, "term")?;
            let engine = params
                .get("engine")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| app.settings.get_settings().search_engine.clone());
            let url = search_url(&engine, term).ok_or_else(|| format!("unknown search engine: {}", engine))?;
            Ok(json!({"url": url}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
