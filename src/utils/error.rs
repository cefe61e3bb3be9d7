use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Invalid period '{expression}': {reason}")]
    InvalidPeriod { expression: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("Invalid branch reference '{reference}': expected <remote>/<branch>")]
    InvalidBranchRef { reference: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CleanerError>;

impl CleanerError {
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn invalid_period(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn invalid_branch_ref(reference: impl Into<String>) -> Self {
        Self::InvalidBranchRef {
            reference: reference.into(),
        }
    }

    /// Errors raised before any repository mutation that should be reported as
    /// a bad invocation rather than a git failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::InvalidPeriod { .. } | Self::InvalidArgs { .. }
        )
    }
}

/// Why a single push or remote delete failed.
///
/// Git only reports these through exit status and stderr; the repository layer
/// classifies the text once so nothing above it has to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteRefError {
    #[error("'{branch}' does not exist on '{remote}'")]
    RefNotFound { remote: String, branch: String },

    #[error("'{branch}' on '{remote}' failed: {message}")]
    OtherFailure {
        remote: String,
        branch: String,
        message: String,
    },
}

impl RemoteRefError {
    pub fn ref_not_found(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self::RefNotFound {
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    pub fn other(
        remote: impl Into<String>,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::OtherFailure {
            remote: remote.into(),
            branch: branch.into(),
            message: message.into(),
        }
    }

    pub fn is_ref_not_found(&self) -> bool {
        matches!(self, Self::RefNotFound { .. })
    }
}
