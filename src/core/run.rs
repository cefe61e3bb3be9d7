use crate::core::classifier::{BranchClassifier, ClassificationOutcome, ReflogOrCommitTime};
use crate::core::git::{BranchRef, MergeStatus, RepositoryOps};
use crate::core::retention::RetentionWindow;
use crate::core::untracked::{MergeBranchesParser, MergeMessageParser, UntrackedMergeDetector};
use crate::core::whitelist::Whitelist;
use crate::utils::Result;
use std::collections::BTreeSet;

/// Settings for one invocation, after flags and config file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub period: String,
    pub merge_status: MergeStatus,
    pub target_branch: String,
    pub source_remote: String,
    pub backup_remote: Option<String>,
    pub whitelist: Vec<String>,
    pub temp_branch_prefix: String,
}

/// Refs selected for deletion. Whitelisted refs can never be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    refs: BTreeSet<BranchRef>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the ref was newly added.
    pub fn insert(&mut self, whitelist: &Whitelist, reference: BranchRef) -> bool {
        if whitelist.contains(reference.as_str()) {
            return false;
        }
        self.refs.insert(reference)
    }

    pub fn extend<I>(&mut self, whitelist: &Whitelist, references: I)
    where
        I: IntoIterator<Item = BranchRef>,
    {
        for reference in references {
            self.insert(whitelist, reference);
        }
    }

    pub fn contains(&self, reference: &BranchRef) -> bool {
        self.refs.contains(reference)
    }

    /// Sorted by ref name.
    pub fn iter(&self) -> impl Iterator<Item = &BranchRef> {
        self.refs.iter()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// All state of a single run: fixed inputs computed at startup plus the
/// candidates and fresh branches accumulated by the detectors.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub options: RunOptions,
    pub window: RetentionWindow,
    pub whitelist: Whitelist,
    pub candidates: CandidateSet,
    pub fresh: Vec<ClassificationOutcome>,
}

impl RunContext {
    /// Resolves the retention window and whitelist. Nothing in the repository
    /// is modified, so a bad period fails here before any checkout or fetch.
    pub fn prepare<R: RepositoryOps + ?Sized>(repo: &R, options: RunOptions) -> Result<Self> {
        let window = RetentionWindow::resolve(repo, &options.period)?;
        let whitelist = Whitelist::build(
            &options.source_remote,
            &options.target_branch,
            &options.whitelist,
        );

        Ok(Self {
            options,
            window,
            whitelist,
            candidates: CandidateSet::new(),
            fresh: Vec::new(),
        })
    }

    /// Fills the candidate set from the merge-status listing and, unless only
    /// unmerged branches were requested, from squash-merge commit subjects.
    pub fn build_cleaning_list<R: RepositoryOps + ?Sized>(&mut self, repo: &R) -> Result<()> {
        let parser = MergeBranchesParser::new()?;
        self.build_cleaning_list_with(repo, parser)
    }

    pub fn build_cleaning_list_with<R, P>(&mut self, repo: &R, parser: P) -> Result<()>
    where
        R: RepositoryOps + ?Sized,
        P: MergeMessageParser,
    {
        let listed = self.list_candidate_refs(repo)?;

        let classifier = BranchClassifier::new(ReflogOrCommitTime::new(repo), &self.window);
        for outcome in classifier.classify_all(listed)? {
            if outcome.is_stale() {
                self.candidates
                    .insert(&self.whitelist, outcome.reference.clone());
            } else {
                self.fresh.push(outcome);
            }
        }

        if self.options.merge_status != MergeStatus::Unmerged {
            let detector = UntrackedMergeDetector::new(parser, &self.options.source_remote);
            let untracked = detector.detect(repo, &self.window, &self.whitelist)?;
            self.candidates.extend(&self.whitelist, untracked);
        }

        tracing::debug!(
            candidates = self.candidates.len(),
            fresh = self.fresh.len(),
            "cleaning list built"
        );

        Ok(())
    }

    fn list_candidate_refs<R: RepositoryOps + ?Sized>(&self, repo: &R) -> Result<BTreeSet<BranchRef>> {
        let pattern = format!("{}/*", self.options.source_remote);
        let raw = repo.list_branches(
            &self.options.source_remote,
            &self.options.target_branch,
            self.options.merge_status,
            &pattern,
        )?;

        let mut refs = BTreeSet::new();
        for token in raw {
            if self.whitelist.contains(&token) {
                continue;
            }
            match BranchRef::parse(&token) {
                Ok(reference) => {
                    refs.insert(reference);
                }
                Err(e) => tracing::debug!(token = %token, error = %e, "skipping listing token"),
            }
        }

        Ok(refs)
    }
}
