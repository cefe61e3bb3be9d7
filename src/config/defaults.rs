use super::{BackupConfig, Config, DefaultsConfig};
use std::path::PathBuf;

pub const DEFAULT_TARGET_BRANCH: &str = "master";
pub const DEFAULT_SOURCE_REMOTE: &str = "origin";
pub const DEFAULT_TEMP_BRANCH_PREFIX: &str = "br_clean_backup_";
pub const CONFIG_PATH_ENV: &str = "BRANCH_CLEANER_CONFIG";

pub fn default_config() -> Config {
    Config {
        defaults: default_defaults_config(),
        backup: default_backup_config(),
    }
}

pub fn default_defaults_config() -> DefaultsConfig {
    DefaultsConfig {
        target_branch: DEFAULT_TARGET_BRANCH.to_string(),
        source_remote: DEFAULT_SOURCE_REMOTE.to_string(),
        backup_remote: None,
        whitelist: Vec::new(),
    }
}

pub fn default_backup_config() -> BackupConfig {
    BackupConfig {
        temp_branch_prefix: DEFAULT_TEMP_BRANCH_PREFIX.to_string(),
    }
}

pub fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "branch-cleaner") {
        proj_dirs.config_dir().to_path_buf()
    } else if let Some(base_dirs) = directories::BaseDirs::new() {
        base_dirs.home_dir().join(".config").join("branch-cleaner")
    } else {
        PathBuf::from(".branch-cleaner")
    }
}

pub fn get_config_file_path() -> PathBuf {
    // Environment override, used by tests and by wrappers with a shared config
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}
