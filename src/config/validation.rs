use super::{BackupConfig, Config, ConfigError, DefaultsConfig, Result};
use crate::core::git::GitValidator;

pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults_config(&config.defaults)?;
    validate_backup_config(&config.backup)?;
    Ok(())
}

pub fn validate_defaults_config(defaults: &DefaultsConfig) -> Result<()> {
    if defaults.target_branch.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Target branch cannot be empty".to_string(),
        ));
    }

    if defaults.source_remote.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Source remote cannot be empty".to_string(),
        ));
    }

    if let Some(backup) = &defaults.backup_remote {
        validate_backup_remote(backup, &defaults.source_remote)?;
    }

    if defaults.whitelist.iter().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "Whitelist entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_backup_config(backup: &BackupConfig) -> Result<()> {
    if backup.temp_branch_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "Temporary branch prefix cannot be empty".to_string(),
        ));
    }

    GitValidator::validate_branch_name(&backup.temp_branch_prefix).map_err(|e| {
        ConfigError::Validation(format!(
            "Temporary branch prefix '{}' is not usable: {}",
            backup.temp_branch_prefix, e
        ))
    })
}

/// Backup and source must differ, otherwise the backup copy would be the very
/// branch that is about to be deleted.
pub fn validate_backup_remote(backup: &str, source: &str) -> Result<()> {
    if backup.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Backup remote cannot be empty".to_string(),
        ));
    }

    if backup == source {
        return Err(ConfigError::Validation(
            "Source remote can not be the backup remote at the same time".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&default_config()).is_ok());
    }

    #[test]
    fn test_empty_target_rejected() {
        let mut config = default_config();
        config.defaults.target_branch = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_source_rejected() {
        let mut config = default_config();
        config.defaults.source_remote = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_backup_equal_to_source_rejected() {
        let result = validate_backup_remote("origin", "origin");
        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("backup")));
        assert!(validate_backup_remote("backup", "origin").is_ok());
    }

    #[test]
    fn test_prefix_must_be_branch_safe() {
        let mut config = default_config();
        config.backup.temp_branch_prefix = "bad prefix".to_string();
        assert!(validate_config(&config).is_err());

        config.backup.temp_branch_prefix = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_whitelist_entry_rejected() {
        let mut config = default_config();
        config.defaults.whitelist = vec!["release".to_string(), "".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
