// App Shelf shared type definitions
// Each submodule defines types used across the stores.

pub mod bookmark;
pub mod config;
pub mod errors;
pub mod search;
pub mod settings;
pub mod widget;
