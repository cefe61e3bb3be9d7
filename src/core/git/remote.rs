use super::repository::{execute_git_command, run_git, GitRepository};
use crate::utils::error::{RemoteRefError, Result};

/// stderr fragments git prints when the ref on either side of a push, or the
/// start point of a new branch, is missing.
const MISSING_REF_MARKERS: &[&str] = &[
    "remote ref does not exist",
    "does not match any",
    "not a valid object name",
    "invalid reference",
];

pub struct RemoteManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> RemoteManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    pub fn list_remotes(&self) -> Result<Vec<String>> {
        let output = execute_git_command(self.repo, &["remote"])?;
        Ok(output.split_whitespace().map(str::to_string).collect())
    }

    pub fn fetch(&self, remote: &str) -> Result<()> {
        execute_git_command(self.repo, &["fetch", "-q", remote]).map(|_| ())
    }

    /// Pushes `local_name` to `remote` as `remote_name`.
    pub fn push_branch(
        &self,
        remote: &str,
        local_name: &str,
        remote_name: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        let refspec = format!("{}:{}", local_name, remote_name);
        self.run_remote_command(remote, remote_name, &["push", "-q", remote, &refspec])
    }

    pub fn delete_remote_branch(
        &self,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        self.run_remote_command(remote, branch, &["push", "-q", "--delete", remote, branch])
    }

    fn run_remote_command(
        &self,
        remote: &str,
        branch: &str,
        args: &[&str],
    ) -> std::result::Result<(), RemoteRefError> {
        let output = run_git(self.repo, args)
            .map_err(|e| RemoteRefError::other(remote, branch, e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_remote_failure(remote, branch, &stderr))
    }
}

pub fn classify_remote_failure(remote: &str, branch: &str, stderr: &str) -> RemoteRefError {
    let lowered = stderr.to_lowercase();
    if MISSING_REF_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        RemoteRefError::ref_not_found(remote, branch)
    } else {
        RemoteRefError::other(remote, branch, stderr.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_classify_missing_ref() {
        let err = classify_remote_failure(
            "origin",
            "gone",
            "error: unable to delete 'gone': remote ref does not exist\n",
        );
        assert_eq!(err, RemoteRefError::ref_not_found("origin", "gone"));

        let err = classify_remote_failure(
            "backup",
            "gone",
            "error: src refspec br_clean_backup_gone does not match any",
        );
        assert!(err.is_ref_not_found());

        let err = classify_remote_failure(
            "origin",
            "ghost",
            "fatal: 'origin/ghost' is not a commit and a branch 'tmp' cannot be created from it\nfatal: invalid reference: origin/ghost",
        );
        assert!(err.is_ref_not_found());
    }

    #[test]
    fn test_classify_other_failure_keeps_message() {
        let err = classify_remote_failure("origin", "topic", "  remote: permission denied\n");
        assert_eq!(
            err,
            RemoteRefError::other("origin", "topic", "remote: permission denied")
        );
    }

    #[test]
    fn test_list_remotes() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        let remotes = RemoteManager::new(&repo).list_remotes().unwrap();
        assert_eq!(remotes, vec!["origin".to_string()]);
    }

    #[test]
    fn test_fetch_unknown_remote_fails() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        let manager = RemoteManager::new(&repo);
        assert!(manager.fetch("origin").is_ok());
        assert!(manager.fetch("nowhere").is_err());
    }

    #[test]
    fn test_delete_remote_branch_twice() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        create_remote_branch(&repo, "doomed", false);

        let manager = RemoteManager::new(&repo);
        assert!(manager.delete_remote_branch("origin", "doomed").is_ok());

        let second = manager.delete_remote_branch("origin", "doomed");
        assert_eq!(second, Err(RemoteRefError::ref_not_found("origin", "doomed")));
    }

    #[test]
    fn test_push_missing_local_branch_is_ref_not_found() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        let manager = RemoteManager::new(&repo);

        let result = manager.push_branch("origin", "no-such-local", "target");
        assert_eq!(result, Err(RemoteRefError::ref_not_found("origin", "target")));
    }
}
