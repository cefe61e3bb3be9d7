use crate::utils::error::{RemoteRefError, Result};

pub mod branch;
pub mod history;
pub mod remote;
pub mod repository;
pub mod validation;

pub use branch::{BranchManager, BranchRef, MergeStatus, ReflogEntry};
pub use history::{HistoryManager, ResolvedPeriod};
pub use remote::RemoteManager;
pub use repository::GitRepository;
pub use validation::GitValidator;

/// Everything the cleanup engine needs from the version-control tool.
///
/// Calls are blocking and strictly sequential; implementations mutate one
/// shared checkout. Branching from a remote ref, push and remote delete report
/// their failures as a closed [`RemoteRefError`] so per-branch outcomes never
/// depend on message text.
pub trait RepositoryOps {
    fn list_remotes(&self) -> Result<Vec<String>>;
    fn current_branch(&self) -> Result<String>;
    fn checkout(&self, branch: &str) -> Result<()>;
    fn checkout_new_from_remote(
        &self,
        new_name: &str,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError>;
    fn fetch(&self, remote: &str) -> Result<()>;
    fn resolve_period(&self, expression: &str) -> Result<ResolvedPeriod>;
    fn list_branches(
        &self,
        remote: &str,
        target: &str,
        status: MergeStatus,
        pattern: &str,
    ) -> Result<Vec<String>>;
    fn reflog_latest(&self, reference: &str) -> Result<Option<ReflogEntry>>;
    fn last_commit_time(&self, reference: &str) -> Result<i64>;
    fn search_merge_commits(&self, grep: &str, before: &str) -> Result<Vec<String>>;
    fn push_branch(
        &self,
        remote: &str,
        local_name: &str,
        remote_name: &str,
    ) -> std::result::Result<(), RemoteRefError>;
    fn delete_remote_branch(
        &self,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError>;
    fn delete_local_branch(&self, name: &str) -> Result<()>;
}

impl RepositoryOps for GitRepository {
    fn list_remotes(&self) -> Result<Vec<String>> {
        RemoteManager::new(self).list_remotes()
    }

    fn current_branch(&self) -> Result<String> {
        self.get_current_branch()
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.checkout_branch(branch)
    }

    fn checkout_new_from_remote(
        &self,
        new_name: &str,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        BranchManager::new(self).checkout_new_from_remote(new_name, remote, branch)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        RemoteManager::new(self).fetch(remote)
    }

    fn resolve_period(&self, expression: &str) -> Result<ResolvedPeriod> {
        history::resolve_period(expression)
    }

    fn list_branches(
        &self,
        remote: &str,
        target: &str,
        status: MergeStatus,
        pattern: &str,
    ) -> Result<Vec<String>> {
        BranchManager::new(self).list_remote_branches(remote, target, status, pattern)
    }

    fn reflog_latest(&self, reference: &str) -> Result<Option<ReflogEntry>> {
        BranchManager::new(self).reflog_latest(reference)
    }

    fn last_commit_time(&self, reference: &str) -> Result<i64> {
        BranchManager::new(self).last_commit_time(reference)
    }

    fn search_merge_commits(&self, grep: &str, before: &str) -> Result<Vec<String>> {
        HistoryManager::new(self).search_merge_commits(grep, before)
    }

    fn push_branch(
        &self,
        remote: &str,
        local_name: &str,
        remote_name: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        RemoteManager::new(self).push_branch(remote, local_name, remote_name)
    }

    fn delete_remote_branch(
        &self,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        RemoteManager::new(self).delete_remote_branch(remote, branch)
    }

    fn delete_local_branch(&self, name: &str) -> Result<()> {
        BranchManager::new(self).delete_local_branch(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_repository_ops_through_trait_object() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        create_remote_branch(&repo, "via-trait", false);

        let ops: &dyn RepositoryOps = &repo;
        assert_eq!(ops.current_branch().unwrap(), "master");
        assert!(ops.list_remotes().unwrap().contains(&"origin".to_string()));

        let listed = ops
            .list_branches("origin", "master", MergeStatus::Merged, "origin/*")
            .unwrap();
        assert!(listed.contains(&"origin/via-trait".to_string()));

        assert!(ops.last_commit_time("origin/via-trait").unwrap() > 0);
        assert!(ops.delete_remote_branch("origin", "via-trait").is_ok());
    }

    #[test]
    fn test_reflog_present_after_push() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        create_remote_branch(&repo, "logged", false);

        let entry = repo.reflog_latest("origin/logged").unwrap();
        let entry = entry.expect("pushing updates the remote-tracking reflog");
        assert!(entry.epoch > 0);
        assert!(entry.raw.contains("logged@{"));
    }

    #[test]
    fn test_reflog_absent_for_unknown_ref() {
        let (_temp_dir, _remote_dir, repo) = setup_test_repo_with_remote();
        assert_eq!(repo.reflog_latest("origin/never-existed").unwrap(), None);
    }
}
