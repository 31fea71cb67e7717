// App Shelf services
// Persistence adapter, settings and configuration.

pub mod config_loader;
pub mod settings_engine;
pub mod storage;
