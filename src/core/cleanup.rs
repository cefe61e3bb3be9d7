//! Per-branch backup and delete protocol.
//!
//! Each candidate ends in exactly one [`DeletionOutcome`]:
//!
//! ```text
//! Candidate --(backup configured)--> BackedUp --> Deleted
//! Candidate --(no backup)------------------------> Deleted
//! any step --> AlreadyRemoved   (ref absent on a remote or its tracking ref gone)
//! any step --> Problematic      (any other remote failure)
//! ```
//!
//! Per-branch failures never stop the batch. Failures that leave the shared
//! checkout in an unknown state (returning to the target branch, removing the
//! temporary branch) abort the run; branches already deleted stay deleted.

use crate::core::git::{BranchRef, RepositoryOps};
use crate::core::run::CandidateSet;
use crate::utils::{RemoteRefError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    AlreadyRemoved,
    Problematic { reason: String },
}

/// Where branches are copied before deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupTarget {
    pub remote: String,
    pub temp_branch_prefix: String,
}

impl BackupTarget {
    pub fn temp_branch_name(&self, branch: &str) -> String {
        format!("{}{}", self.temp_branch_prefix, branch)
    }
}

enum BackupResult {
    Verified,
    Skipped(DeletionOutcome),
}

/// Disjoint outcome buckets, each sorted by ref name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: Vec<BranchRef>,
    pub already_removed: Vec<BranchRef>,
    pub problematic: Vec<BranchRef>,
}

impl CleanupReport {
    pub fn record(&mut self, reference: BranchRef, outcome: &DeletionOutcome) {
        match outcome {
            DeletionOutcome::Deleted => self.deleted.push(reference),
            DeletionOutcome::AlreadyRemoved => self.already_removed.push(reference),
            DeletionOutcome::Problematic { .. } => self.problematic.push(reference),
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.already_removed.is_empty() && self.problematic.is_empty()
    }

    pub fn total(&self) -> usize {
        self.deleted.len() + self.already_removed.len() + self.problematic.len()
    }
}

pub struct CleanupOrchestrator<'a, R: RepositoryOps + ?Sized> {
    repo: &'a R,
    target_branch: &'a str,
    backup: Option<BackupTarget>,
}

impl<'a, R: RepositoryOps + ?Sized> CleanupOrchestrator<'a, R> {
    pub fn new(repo: &'a R, target_branch: &'a str, backup: Option<BackupTarget>) -> Self {
        Self {
            repo,
            target_branch,
            backup,
        }
    }

    pub fn run(&self, candidates: &CandidateSet) -> Result<CleanupReport> {
        self.run_with_progress(candidates, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_branch` before each branch is processed.
    pub fn run_with_progress<F>(
        &self,
        candidates: &CandidateSet,
        mut on_branch: F,
    ) -> Result<CleanupReport>
    where
        F: FnMut(&BranchRef),
    {
        let mut report = CleanupReport::default();

        for reference in candidates.iter() {
            on_branch(reference);
            let outcome = self.process(reference)?;
            report.record(reference.clone(), &outcome);
        }

        Ok(report)
    }

    /// Drives one branch to its terminal outcome.
    pub fn process(&self, reference: &BranchRef) -> Result<DeletionOutcome> {
        if let Some(backup) = &self.backup {
            if let BackupResult::Skipped(outcome) = self.back_up(backup, reference)? {
                return Ok(outcome);
            }
        }

        let deleted = self
            .repo
            .delete_remote_branch(reference.remote(), reference.name());

        Ok(match deleted {
            Ok(()) => {
                tracing::info!(branch = %reference, "deleted");
                DeletionOutcome::Deleted
            }
            Err(error) => remote_failure_outcome(reference, error),
        })
    }

    /// Copies the branch to the backup remote through a temporary local branch.
    ///
    /// Once the temporary branch exists it is always removed again, even when
    /// the push failed, so the next candidate starts from the target branch.
    fn back_up(&self, backup: &BackupTarget, reference: &BranchRef) -> Result<BackupResult> {
        let temp_branch = backup.temp_branch_name(reference.name());

        let prepared =
            self.repo
                .checkout_new_from_remote(&temp_branch, reference.remote(), reference.name());
        if let Err(error) = prepared {
            tracing::debug!(branch = %reference, error = %error, "could not prepare backup copy");
            return Ok(BackupResult::Skipped(remote_failure_outcome(reference, error)));
        }

        let pushed = self
            .repo
            .push_branch(&backup.remote, &temp_branch, reference.name());

        self.repo.checkout(self.target_branch)?;
        self.repo.delete_local_branch(&temp_branch)?;

        match pushed {
            Ok(()) => {
                tracing::debug!(branch = %reference, backup = %backup.remote, "backed up");
                Ok(BackupResult::Verified)
            }
            Err(error) => Ok(BackupResult::Skipped(remote_failure_outcome(reference, error))),
        }
    }
}

fn remote_failure_outcome(reference: &BranchRef, error: RemoteRefError) -> DeletionOutcome {
    match error {
        RemoteRefError::RefNotFound { .. } => {
            tracing::warn!(branch = %reference, "already removed");
            DeletionOutcome::AlreadyRemoved
        }
        RemoteRefError::OtherFailure { message, .. } => {
            tracing::warn!(branch = %reference, error = %message, "could not be removed");
            DeletionOutcome::Problematic { reason: message }
        }
    }
}
