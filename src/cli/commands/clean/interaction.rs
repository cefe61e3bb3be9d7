use crate::utils::{CleanerError, Result};
use dialoguer::Confirm;

pub struct CleanupInteraction {
    backup_remote: Option<String>,
}

impl CleanupInteraction {
    pub fn new(backup_remote: Option<String>) -> Self {
        Self { backup_remote }
    }

    fn is_non_interactive() -> bool {
        std::env::var("BRANCH_CLEANER_NON_INTERACTIVE").is_ok()
            || std::env::var("CI").is_ok()
            || !atty::is(atty::Stream::Stdin)
    }

    pub fn backup_notice(&self) -> String {
        match &self.backup_remote {
            None => "WARNING! Backup remote is not set. If you continue, branches will be \
                     completely deleted, and there is no turning back!"
                .to_string(),
            Some(remote) => format!(
                "Before deleting, branches are going to be copied to the {} remote.",
                remote
            ),
        }
    }

    pub fn confirm_deletion(&self) -> Result<bool> {
        println!("\n{}\n", self.backup_notice());

        if Self::is_non_interactive() {
            return Err(CleanerError::invalid_args(
                "Cannot delete branches in non-interactive mode. Use --force flag to skip confirmation prompts.",
            ));
        }

        Ok(Confirm::new()
            .with_prompt("Do you want to delete them all?")
            .default(false)
            .interact()
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_warns_without_backup() {
        let interaction = CleanupInteraction::new(None);
        assert!(interaction.backup_notice().starts_with("WARNING!"));
    }

    #[test]
    fn test_notice_names_backup_remote() {
        let interaction = CleanupInteraction::new(Some("archive".to_string()));
        let notice = interaction.backup_notice();
        assert!(notice.contains("archive"));
        assert!(!notice.contains("WARNING"));
    }

    #[test]
    fn test_non_interactive_refuses() {
        let previous = std::env::var_os("BRANCH_CLEANER_NON_INTERACTIVE");
        std::env::set_var("BRANCH_CLEANER_NON_INTERACTIVE", "1");

        let interaction = CleanupInteraction::new(None);
        let result = interaction.confirm_deletion();

        match previous {
            Some(value) => std::env::set_var("BRANCH_CLEANER_NON_INTERACTIVE", value),
            None => std::env::remove_var("BRANCH_CLEANER_NON_INTERACTIVE"),
        }
        assert!(matches!(result, Err(CleanerError::InvalidArgs { .. })));
    }
}
