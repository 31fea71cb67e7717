// App Shelf stores
// Managers own the mutable state: the bookmark tree, folder identity and widgets.

pub mod bookmark_manager;
pub mod folder_manager;
pub mod widget_manager;
