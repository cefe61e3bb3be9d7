use super::remote::classify_remote_failure;
use super::repository::{execute_git_command, run_git, GitRepository};
use super::validation::GitValidator;
use crate::utils::error::{CleanerError, RemoteRefError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static REFLOG_SELECTOR: OnceLock<Option<Regex>> = OnceLock::new();

/// A branch scoped to a remote, written `<remote>/<name>`.
///
/// Only the first `/` separates the remote, so `origin/feature/x` names branch
/// `feature/x` on `origin`. Equality is exact string equality of the full ref.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchRef(String);

impl BranchRef {
    pub fn new(remote: &str, name: &str) -> Self {
        Self(format!("{}/{}", remote, name))
    }

    pub fn parse(reference: &str) -> Result<Self> {
        match reference.split_once('/') {
            Some((remote, name)) if !remote.is_empty() && !name.is_empty() => {
                Ok(Self(reference.to_string()))
            }
            _ => Err(CleanerError::invalid_branch_ref(reference)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn remote(&self) -> &str {
        self.split().0
    }

    pub fn name(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Construction guarantees a separator
        self.0.split_once('/').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BranchRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which branches the listing should return, relative to the target branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MergeStatus {
    Merged,
    Unmerged,
    Both,
}

impl MergeStatus {
    pub fn git_flag(&self) -> Option<&'static str> {
        match self {
            MergeStatus::Merged => Some("--merged"),
            MergeStatus::Unmerged => Some("--no-merged"),
            MergeStatus::Both => None,
        }
    }

    /// Wording used in the eligibility report; empty for `Both`.
    pub fn label(&self) -> &'static str {
        match self {
            MergeStatus::Merged => "merged",
            MergeStatus::Unmerged => "unmerged",
            MergeStatus::Both => "",
        }
    }
}

/// The newest reflog entry of a ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogEntry {
    pub epoch: i64,
    pub raw: String,
}

impl ReflogEntry {
    /// Parses `%gd` output rendered with `--date=raw`, e.g.
    /// `origin/topic@{1384871928 +0200}`.
    pub fn parse(raw: &str) -> Option<Self> {
        let selector = REFLOG_SELECTOR
            .get_or_init(|| Regex::new(r"@\{(\d+)(?:\s+[+-]\d{4})?\}\s*$").ok())
            .as_ref()?;

        let raw = raw.trim();
        let captures = selector.captures(raw)?;
        let epoch = captures.get(1)?.as_str().parse().ok()?;

        Some(Self {
            epoch,
            raw: raw.to_string(),
        })
    }
}

pub struct BranchManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    /// Lists remote-tracking refs matching `pattern`, filtered by merge status
    /// against `<remote>/<target>`.
    ///
    /// Output is split on whitespace, so the symbolic `origin/HEAD -> origin/master`
    /// line contributes the `->` token as well. Callers drop it through the whitelist.
    pub fn list_remote_branches(
        &self,
        remote: &str,
        target: &str,
        status: MergeStatus,
        pattern: &str,
    ) -> Result<Vec<String>> {
        let against = format!("{}/{}", remote, target);
        let mut args = vec!["branch", "-r", "--list"];
        if let Some(flag) = status.git_flag() {
            args.push(flag);
            args.push(&against);
        }
        args.push(pattern);

        let output = execute_git_command(self.repo, &args)?;
        Ok(output.split_whitespace().map(str::to_string).collect())
    }

    pub fn reflog_latest(&self, reference: &str) -> Result<Option<ReflogEntry>> {
        let output = execute_git_command(
            self.repo,
            &["log", "-g", "-n", "1", "--date=raw", "--pretty=%gd", reference],
        );

        match output {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(ReflogEntry::parse(&text)),
            Err(e) => {
                tracing::debug!(reference, error = %e, "no reflog available");
                Ok(None)
            }
        }
    }

    pub fn last_commit_time(&self, reference: &str) -> Result<i64> {
        let output = execute_git_command(self.repo, &["show", "-s", "--format=%ct", reference])?;
        output.trim().parse().map_err(|_| {
            CleanerError::git_operation(format!(
                "Unexpected commit time for '{}': {}",
                reference, output
            ))
        })
    }

    /// Creates `new_name` from `<remote>/<branch>` and checks it out.
    ///
    /// A start point missing from the remote-tracking refs is reported as
    /// [`RemoteRefError::RefNotFound`], the same kind a push or remote delete
    /// of a vanished branch yields.
    pub fn checkout_new_from_remote(
        &self,
        new_name: &str,
        remote: &str,
        branch: &str,
    ) -> std::result::Result<(), RemoteRefError> {
        GitValidator::validate_branch_name(new_name)
            .map_err(|e| RemoteRefError::other(remote, branch, e.to_string()))?;

        let tracking_ref = format!("refs/remotes/{}/{}", remote, branch);
        let verified = run_git(self.repo, &["rev-parse", "--verify", "-q", &tracking_ref])
            .map_err(|e| RemoteRefError::other(remote, branch, e.to_string()))?;
        if !verified.status.success() {
            return Err(RemoteRefError::ref_not_found(remote, branch));
        }

        let start_point = format!("{}/{}", remote, branch);
        let output = run_git(self.repo, &["checkout", "-q", "-b", new_name, &start_point])
            .map_err(|e| RemoteRefError::other(remote, branch, e.to_string()))?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_remote_failure(remote, branch, &stderr))
    }

    pub fn delete_local_branch(&self, name: &str) -> Result<()> {
        GitValidator::validate_branch_name(name)?;

        let current_branch = self.repo.get_current_branch()?;
        if current_branch == name {
            return Err(CleanerError::git_operation(format!(
                "Cannot delete '{}' while it is checked out",
                name
            )));
        }

        execute_git_command(self.repo, &["branch", "-q", "-D", name]).map(|_| ())
    }
}
