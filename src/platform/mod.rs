// App Shelf platform paths
// Resolves per-user config and data directories through the `dirs` crate.
//
// `APPSHELF_DATA_DIR` overrides the data directory (used by the RPC bridge
// when the host application manages its own profile folder).

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "appshelf";

/// Environment variable that replaces the data directory.
pub const DATA_DIR_ENV: &str = "APPSHELF_DATA_DIR";

/// Returns the configuration directory, e.g. `~/.config/appshelf` on Linux.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
}

/// Returns the data directory, e.g. `~/.local/share/appshelf` on Linux.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir().unwrap_or_else(env::temp_dir).join(APP_DIR)
}
