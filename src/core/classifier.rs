use crate::core::git::{BranchRef, RepositoryOps};
use crate::core::retention::RetentionWindow;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySource {
    Reflog,
    CommitTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub epoch: i64,
    pub source: ActivitySource,
}

/// Decides when a branch was last active.
pub trait ActivityTimestampSource {
    fn last_activity(&self, reference: &BranchRef) -> Result<Activity>;
}

/// Newest reflog entry first, tip commit time otherwise.
///
/// Reflogs expire independently of history, so a missing entry only means the
/// ref has to be dated by its commit.
pub struct ReflogOrCommitTime<'a, R: RepositoryOps + ?Sized> {
    repo: &'a R,
}

impl<'a, R: RepositoryOps + ?Sized> ReflogOrCommitTime<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

impl<R: RepositoryOps + ?Sized> ActivityTimestampSource for ReflogOrCommitTime<'_, R> {
    fn last_activity(&self, reference: &BranchRef) -> Result<Activity> {
        if let Some(entry) = self.repo.reflog_latest(reference.as_str())? {
            return Ok(Activity {
                epoch: entry.epoch,
                source: ActivitySource::Reflog,
            });
        }

        let epoch = self.repo.last_commit_time(reference.as_str())?;
        Ok(Activity {
            epoch,
            source: ActivitySource::CommitTime,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Stale,
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationOutcome {
    pub reference: BranchRef,
    pub last_activity_epoch: i64,
    pub activity_source: ActivitySource,
    pub bucket: Bucket,
}

impl ClassificationOutcome {
    pub fn is_stale(&self) -> bool {
        self.bucket == Bucket::Stale
    }
}

pub struct BranchClassifier<'a, S: ActivityTimestampSource> {
    source: S,
    window: &'a RetentionWindow,
}

impl<'a, S: ActivityTimestampSource> BranchClassifier<'a, S> {
    pub fn new(source: S, window: &'a RetentionWindow) -> Self {
        Self { source, window }
    }

    pub fn classify(&self, reference: BranchRef) -> Result<ClassificationOutcome> {
        let activity = self.source.last_activity(&reference)?;
        let bucket = if self.window.is_stale(activity.epoch) {
            Bucket::Stale
        } else {
            Bucket::Fresh
        };

        tracing::debug!(
            branch = %reference,
            last_activity = activity.epoch,
            source = ?activity.source,
            bucket = ?bucket,
            "classified branch"
        );

        Ok(ClassificationOutcome {
            reference,
            last_activity_epoch: activity.epoch,
            activity_source: activity.source,
            bucket,
        })
    }

    pub fn classify_all<I>(&self, references: I) -> Result<Vec<ClassificationOutcome>>
    where
        I: IntoIterator<Item = BranchRef>,
    {
        references
            .into_iter()
            .map(|reference| self.classify(reference))
            .collect()
    }
}
