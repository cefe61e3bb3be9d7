
pub mod mock {
    use crate::core::git::{MergeStatus, ReflogEntry, RepositoryOps, ResolvedPeriod};
    use crate::utils::{CleanerError, RemoteRefError, Result};
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap};

    /// Scripted stand-in for the git executable. Every call is appended to
    /// `calls` so tests can assert on ordering.
    pub struct MockRepository {
        pub remotes: Vec<String>,
        pub listing: Vec<String>,
        pub reflogs: HashMap<String, i64>,
        pub commit_times: HashMap<String, i64>,
        pub merge_messages: Vec<String>,
        pub period: Option<ResolvedPeriod>,
        pub push_failures: HashMap<String, RemoteRefError>,
        pub delete_failures: HashMap<String, RemoteRefError>,
        pub checkout_new_failures: HashMap<String, RemoteRefError>,
        pub fail_fetch: bool,
        pub fail_checkout: bool,
        pub current: RefCell<String>,
        pub local_branches: RefCell<BTreeSet<String>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl Default for MockRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockRepository {
        pub fn new() -> Self {
            Self {
                remotes: vec!["origin".to_string()],
                listing: Vec::new(),
                reflogs: HashMap::new(),
                commit_times: HashMap::new(),
                merge_messages: Vec::new(),
                period: Some(ResolvedPeriod {
                    epoch: 1_000,
                    human: "Thu Jan  1 00:16:40 +00:00 1970".to_string(),
                }),
                push_failures: HashMap::new(),
                delete_failures: HashMap::new(),
                checkout_new_failures: HashMap::new(),
                fail_fetch: false,
                fail_checkout: false,
                current: RefCell::new("master".to_string()),
                local_branches: RefCell::new(BTreeSet::from(["master".to_string()])),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn with_remote(mut self, name: &str) -> Self {
            self.remotes.push(name.to_string());
            self
        }

        pub fn with_listing(mut self, refs: &[&str]) -> Self {
            self.listing = refs.iter().map(|r| r.to_string()).collect();
            self
        }

        pub fn with_reflog(mut self, reference: &str, epoch: i64) -> Self {
            self.reflogs.insert(reference.to_string(), epoch);
            self
        }

        pub fn with_commit_time(mut self, reference: &str, epoch: i64) -> Self {
            self.commit_times.insert(reference.to_string(), epoch);
            self
        }

        pub fn with_merge_message(mut self, message: &str) -> Self {
            self.merge_messages.push(message.to_string());
            self
        }

        pub fn with_period(mut self, epoch: i64, human: &str) -> Self {
            self.period = Some(ResolvedPeriod {
                epoch,
                human: human.to_string(),
            });
            self
        }

        pub fn with_unresolvable_period(mut self) -> Self {
            self.period = None;
            self
        }

        pub fn with_push_failure(mut self, remote_name: &str, error: RemoteRefError) -> Self {
            self.push_failures.insert(remote_name.to_string(), error);
            self
        }

        pub fn with_delete_failure(mut self, branch: &str, error: RemoteRefError) -> Self {
            self.delete_failures.insert(branch.to_string(), error);
            self
        }

        pub fn with_checkout_new_failure(mut self, branch: &str) -> Self {
            self.checkout_new_failures.insert(
                branch.to_string(),
                RemoteRefError::other("origin", branch, "cannot lock ref"),
            );
            self
        }

        /// The remote-tracking ref of `branch` is gone, as after a remote delete.
        pub fn with_vanished_branch(mut self, branch: &str) -> Self {
            self.checkout_new_failures
                .insert(branch.to_string(), RemoteRefError::ref_not_found("origin", branch));
            self
        }

        pub fn with_current_branch(self, branch: &str) -> Self {
            *self.current.borrow_mut() = branch.to_string();
            self.local_branches.borrow_mut().insert(branch.to_string());
            self
        }

        pub fn failing_fetch(mut self) -> Self {
            self.fail_fetch = true;
            self
        }

        pub fn failing_checkout(mut self) -> Self {
            self.fail_checkout = true;
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .filter(|call| call.starts_with(prefix))
                .cloned()
                .collect()
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl RepositoryOps for MockRepository {
        fn list_remotes(&self) -> Result<Vec<String>> {
            self.record("remotes".to_string());
            Ok(self.remotes.clone())
        }

        fn current_branch(&self) -> Result<String> {
            Ok(self.current.borrow().clone())
        }

        fn checkout(&self, branch: &str) -> Result<()> {
            self.record(format!("checkout {}", branch));
            if self.fail_checkout {
                return Err(CleanerError::git_operation("checkout failed"));
            }
            *self.current.borrow_mut() = branch.to_string();
            Ok(())
        }

        fn checkout_new_from_remote(
            &self,
            new_name: &str,
            remote: &str,
            branch: &str,
        ) -> std::result::Result<(), RemoteRefError> {
            self.record(format!("checkout-new {} {}/{}", new_name, remote, branch));
            if let Some(error) = self.checkout_new_failures.get(branch) {
                return Err(error.clone());
            }
            self.local_branches.borrow_mut().insert(new_name.to_string());
            *self.current.borrow_mut() = new_name.to_string();
            Ok(())
        }

        fn fetch(&self, remote: &str) -> Result<()> {
            self.record(format!("fetch {}", remote));
            if self.fail_fetch {
                return Err(CleanerError::git_operation("could not read from remote"));
            }
            Ok(())
        }

        fn resolve_period(&self, expression: &str) -> Result<ResolvedPeriod> {
            self.record(format!("resolve {}", expression));
            self.period
                .clone()
                .ok_or_else(|| CleanerError::invalid_period(expression, "invalid date"))
        }

        fn list_branches(
            &self,
            remote: &str,
            target: &str,
            status: MergeStatus,
            pattern: &str,
        ) -> Result<Vec<String>> {
            self.record(format!(
                "list {} {}/{} {:?}",
                pattern, remote, target, status
            ));
            Ok(self.listing.clone())
        }

        fn reflog_latest(&self, reference: &str) -> Result<Option<ReflogEntry>> {
            Ok(self.reflogs.get(reference).map(|epoch| ReflogEntry {
                epoch: *epoch,
                raw: format!("{}@{{{} +0000}}", reference, epoch),
            }))
        }

        fn last_commit_time(&self, reference: &str) -> Result<i64> {
            self.commit_times.get(reference).copied().ok_or_else(|| {
                CleanerError::git_operation(format!("unknown revision {}", reference))
            })
        }

        fn search_merge_commits(&self, grep: &str, before: &str) -> Result<Vec<String>> {
            self.record(format!("log {} before {}", grep, before));
            Ok(self.merge_messages.clone())
        }

        fn push_branch(
            &self,
            remote: &str,
            local_name: &str,
            remote_name: &str,
        ) -> std::result::Result<(), RemoteRefError> {
            self.record(format!("push {} {}:{}", remote, local_name, remote_name));
            match self.push_failures.get(remote_name) {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn delete_remote_branch(
            &self,
            remote: &str,
            branch: &str,
        ) -> std::result::Result<(), RemoteRefError> {
            self.record(format!("delete {} {}", remote, branch));
            match self.delete_failures.get(branch) {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn delete_local_branch(&self, name: &str) -> Result<()> {
            self.record(format!("delete-local {}", name));
            if *self.current.borrow() == name {
                return Err(CleanerError::git_operation("cannot delete checked out branch"));
            }
            self.local_branches.borrow_mut().remove(name);
            Ok(())
        }
    }
}
