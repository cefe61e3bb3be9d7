use crate::utils::error::{CleanerError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
    pub git_dir: PathBuf,
}

impl GitRepository {
    pub fn discover() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CleanerError::git_operation(format!("Failed to get current directory: {}", e))
        })?;

        Self::discover_from(&current_dir)
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| CleanerError::git_operation(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CleanerError::git_operation(format!(
                "Not a git repository or git not found: {}",
                stderr.trim()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let root = PathBuf::from(root);

        let git_dir = Self::get_git_dir(&root)?;

        Ok(Self { root, git_dir })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(CleanerError::git_operation(
                "Repository root does not exist",
            ));
        }

        if !self.git_dir.exists() {
            return Err(CleanerError::git_operation(
                "Git directory does not exist",
            ));
        }

        Ok(())
    }

    pub fn get_current_branch(&self) -> Result<String> {
        execute_git_command(self, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn checkout_branch(&self, branch: &str) -> Result<()> {
        execute_git_command(self, &["checkout", "-q", branch]).map(|_| ())
    }

    fn get_git_dir(repo_root: &Path) -> Result<PathBuf> {
        let output = Command::new("git")
            .current_dir(repo_root)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map_err(|e| CleanerError::git_operation(format!("Failed to get git dir: {}", e)))?;

        if !output.status.success() {
            return Err(CleanerError::git_operation(
                "Failed to determine git directory",
            ));
        }

        let git_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let git_dir = if Path::new(&git_dir).is_absolute() {
            PathBuf::from(git_dir)
        } else {
            repo_root.join(git_dir)
        };

        Ok(git_dir)
    }
}

/// Runs git to completion and hands back the raw output, whatever the exit status.
pub fn run_git(repo: &GitRepository, args: &[&str]) -> Result<Output> {
    tracing::debug!(command = %args.join(" "), "running git");

    Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| CleanerError::git_operation(format!("Failed to execute git: {}", e)))
}

pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    let output = run_git(repo, args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CleanerError::git_operation(format!(
            "Git command failed ({}): {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}
