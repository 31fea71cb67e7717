// App Shelf config loader
// Reads and writes `config.json` at the platform config path.

use std::fs;
use std::path::Path;

use tracing::Level;

use crate::platform;
use crate::types::config::AppConfig;
use crate::types::errors::ConfigError;

pub struct ConfigLoader {
    config_path: String,
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a loader for `path_override`, or `<config dir>/config.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("config.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            config: AppConfig::default(),
        }
    }

    /// Loads the config file.
    ///
    /// If the file does not exist, returns defaults.
    /// If the file exists but is malformed, returns a parse error.
    pub fn load(&mut self) -> Result<AppConfig, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.config = AppConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config file: {}", e)))?;

        if config.favicon_size == 0 {
            return Err(ConfigError::InvalidValue(
                "favicon_size must be greater than zero".to_string(),
            ));
        }
        log_level(&config)?;

        self.config = config;
        Ok(self.config.clone())
    }

    /// Writes the current config, creating parent directories as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

/// Parses the configured log level (`trace`, `debug`, `info`, `warn`, `error`).
pub fn log_level(config: &AppConfig) -> Result<Level, ConfigError> {
    config
        .log_level
        .parse::<Level>()
        .map_err(|_| ConfigError::InvalidValue(format!("Unknown log level: {}", config.log_level)))
}

/// Installs the stderr `tracing` subscriber at the configured level.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &AppConfig) {
    let level = log_level(config).unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
