use crate::core::git::{BranchRef, GitValidator, RepositoryOps};
use crate::core::retention::RetentionWindow;
use crate::core::whitelist::Whitelist;
use crate::utils::Result;
use regex::Regex;
use std::collections::BTreeSet;

/// Recognises merge commits that name the branches they absorbed.
pub trait MergeMessageParser {
    /// Pattern handed to `git log --grep` to preselect candidate commits.
    fn log_pattern(&self) -> &str;

    /// Branch names a single commit subject says were merged.
    fn branch_names(&self, message: &str) -> BTreeSet<String>;
}

/// `Merge branches 'a', 'b' and 'c' into release`, the subject produced when
/// several feature branches are rebased and squashed into a release branch.
pub struct MergeBranchesParser {
    subject: Regex,
    quoted: Regex,
}

impl MergeBranchesParser {
    pub const LOG_PATTERN: &'static str = "^Merge branches.*into";

    pub fn new() -> Result<Self> {
        Ok(Self {
            subject: Regex::new(r"^\s*Merge branches (?P<names>.+) into \S+")?,
            quoted: Regex::new(r"'([^']+)'")?,
        })
    }
}

impl MergeMessageParser for MergeBranchesParser {
    fn log_pattern(&self) -> &str {
        Self::LOG_PATTERN
    }

    fn branch_names(&self, message: &str) -> BTreeSet<String> {
        let Some(captures) = self.subject.captures(message) else {
            return BTreeSet::new();
        };
        let Some(names) = captures.name("names") else {
            return BTreeSet::new();
        };

        self.quoted
            .captures_iter(names.as_str())
            .filter_map(|quoted| quoted.get(1))
            .map(|name| name.as_str())
            .filter(|name| match GitValidator::validate_branch_name(name) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(token = %name, error = %e, "skipping quoted token");
                    false
                }
            })
            .map(str::to_string)
            .collect()
    }
}

/// Finds branches whose merge-graph membership was lost to a rebase-and-squash
/// merge. The log search is bounded by the retention window, so every hit is
/// already stale and no further date check applies.
pub struct UntrackedMergeDetector<P: MergeMessageParser> {
    parser: P,
    source_remote: String,
}

impl<P: MergeMessageParser> UntrackedMergeDetector<P> {
    pub fn new(parser: P, source_remote: impl Into<String>) -> Self {
        Self {
            parser,
            source_remote: source_remote.into(),
        }
    }

    /// Branch names mentioned by any of `messages`, deduplicated.
    pub fn extract<S: AsRef<str>>(&self, messages: &[S]) -> BTreeSet<String> {
        messages
            .iter()
            .flat_map(|message| self.parser.branch_names(message.as_ref()))
            .collect()
    }

    pub fn detect<R: RepositoryOps + ?Sized>(
        &self,
        repo: &R,
        window: &RetentionWindow,
        whitelist: &Whitelist,
    ) -> Result<BTreeSet<BranchRef>> {
        let messages = repo.search_merge_commits(self.parser.log_pattern(), window.expression())?;
        let names = self.extract(&messages);

        let detected: BTreeSet<BranchRef> = names
            .iter()
            .map(|name| BranchRef::new(&self.source_remote, name))
            .filter(|reference| !whitelist.contains(reference.as_str()))
            .collect();

        tracing::debug!(
            commits = messages.len(),
            branches = detected.len(),
            "untracked merge scan finished"
        );

        Ok(detected)
    }
}
