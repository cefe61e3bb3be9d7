use super::defaults::{default_config, get_config_file_path};
use super::{Config, Result};
use std::fs;
use std::path::Path;

/// Reads the optional config file. Nothing is ever written back: every run
/// starts from the file (or built-in defaults) and keeps no state.
pub struct ConfigManager;

impl ConfigManager {
    pub fn get_config_path() -> String {
        get_config_file_path().to_string_lossy().to_string()
    }

    pub fn load() -> Result<Config> {
        Self::load_with_path(None)
    }

    pub fn load_with_path(config_path: Option<&Path>) -> Result<Config> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => get_config_file_path(),
        };

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config file");
            Self::load_from_file(&config_path)
        } else {
            let config = default_config();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
