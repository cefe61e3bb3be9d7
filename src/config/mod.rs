use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "defaults::default_defaults_config")]
    pub defaults: DefaultsConfig,
    #[serde(default = "defaults::default_backup_config")]
    pub backup: BackupConfig,
}

/// Values used when the matching command-line flag is absent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    pub target_branch: String,
    pub source_remote: String,
    #[serde(default)]
    pub backup_remote: Option<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    pub temp_branch_prefix: String,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for crate::utils::CleanerError {
    fn from(error: ConfigError) -> Self {
        crate::utils::CleanerError::config_error(error.to_string())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        ConfigManager::load()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    pub fn target_branch(&self) -> &str {
        &self.defaults.target_branch
    }

    pub fn source_remote(&self) -> &str {
        &self.defaults.source_remote
    }

    pub fn backup_remote(&self) -> Option<&str> {
        self.defaults.backup_remote.as_deref()
    }

    pub fn temp_branch_prefix(&self) -> &str {
        &self.backup.temp_branch_prefix
    }
}

impl Default for Config {
    fn default() -> Self {
        defaults::default_config()
    }
}
