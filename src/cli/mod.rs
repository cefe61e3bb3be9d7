pub mod commands;
pub mod parser;

pub use parser::Cli;

use crate::config::{Config, ConfigManager};
use crate::utils::{CleanerError, Result};

pub fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None)
}

pub fn execute_command_with_config(cli: Cli, test_config: Option<Config>) -> Result<()> {
    cli.validate()?;

    let config = match test_config {
        Some(cfg) => cfg,
        None => ConfigManager::load().map_err(|e| {
            CleanerError::config_error(format!(
                "Failed to load config from {}: {}",
                ConfigManager::get_config_path(),
                e
            ))
        })?,
    };

    commands::clean::execute(config, cli)
}
