pub mod classifier;
pub mod cleanup;
pub mod git;
pub mod retention;
pub mod run;
pub mod untracked;
pub mod whitelist;

pub use classifier::{BranchClassifier, ClassificationOutcome, ReflogOrCommitTime};
pub use cleanup::{BackupTarget, CleanupOrchestrator, CleanupReport, DeletionOutcome};
pub use retention::RetentionWindow;
pub use run::{CandidateSet, RunContext, RunOptions};
pub use untracked::{MergeBranchesParser, MergeMessageParser, UntrackedMergeDetector};
pub use whitelist::Whitelist;
