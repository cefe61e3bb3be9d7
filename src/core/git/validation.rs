use crate::utils::error::{CleanerError, Result};
use regex::Regex;

/// Centralized Git-related validation utilities
pub struct GitValidator;

impl GitValidator {
    /// Validate a Git branch name according to Git's naming rules
    pub fn validate_branch_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CleanerError::git_operation("Branch name cannot be empty"));
        }

        if name.len() > 250 {
            return Err(CleanerError::git_operation("Branch name too long"));
        }

        let invalid_patterns = [
            r"^-",                 // Starts with -
            r"/$",                 // Ends with /
            r"[\x00-\x1f\x7f]",    // Contains control characters
            r"[ \t]",              // Contains whitespace
            r"~|\^|:|\\|\*|\?|\[", // Contains special Git characters
            r"^@$",                // Exactly "@"
            r"/\.",                // Contains "/."
            r"\.\.",               // Contains ".."
            r"@\{",                // Contains "@{"
            r"\.lock$",            // Ends with .lock
        ];

        for pattern in invalid_patterns {
            let regex = Regex::new(pattern)?;
            if regex.is_match(name) {
                return Err(CleanerError::git_operation(format!(
                    "Invalid branch name '{}': contains invalid characters or patterns",
                    name
                )));
            }
        }

        if name.starts_with("refs/") {
            return Err(CleanerError::git_operation(
                "Branch name cannot start with 'refs/'",
            ));
        }

        Ok(())
    }

    /// Remote names follow the same ref-format rules but may not contain '/'.
    pub fn validate_remote_name(name: &str) -> Result<()> {
        Self::validate_branch_name(name)?;

        if name.contains('/') {
            return Err(CleanerError::git_operation(format!(
                "Invalid remote name '{}': remote names cannot contain '/'",
                name
            )));
        }

        Ok(())
    }
}
