use crate::core::git::{BranchRef, MergeStatus};
use crate::core::{CleanupReport, RunContext};

/// Everything the clean command prints to stdout. Diagnostics go through
/// `tracing` instead.
pub struct CleanupReporter;

impl CleanupReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn show_checkout(&self, from: &str, to: &str) {
        println!("** Checking out from {} to {}\n", from, to);
    }

    pub fn show_nothing_to_delete(&self, source_remote: &str) {
        println!("{}", self.nothing_to_delete(source_remote));
    }

    pub fn show_cleaning_list(&self, context: &RunContext) {
        print!("{}", self.cleaning_list(context));
    }

    pub fn show_removing(&self, reference: &BranchRef) {
        println!("** Removing {}", reference);
    }

    pub fn show_results(&self, report: &CleanupReport) {
        print!("{}", self.results(report));
    }

    fn nothing_to_delete(&self, source_remote: &str) -> String {
        format!(
            "There are no eligible branches to delete in the {} repository!",
            source_remote
        )
    }

    fn cleaning_list(&self, context: &RunContext) -> String {
        let status = match context.options.merge_status {
            MergeStatus::Both => String::new(),
            other => format!(" {}", other.label()),
        };

        let mut out = format!(
            "There are {}{} branches that are older than {} and eligible to remove:\n",
            context.candidates.len(),
            status,
            context.window.human_label()
        );
        for reference in context.candidates.iter() {
            out.push_str(&format!("   {}\n", reference));
        }
        out
    }

    fn results(&self, report: &CleanupReport) -> String {
        let mut out = String::new();

        if !report.already_removed.is_empty() {
            out.push_str(
                "\nThese branches have already been removed, so no action has been taken for them:\n",
            );
            push_list(&mut out, &report.already_removed);
        }

        if report.problematic.is_empty() {
            out.push_str("\nAll is done!\n");
        } else {
            out.push_str("\nThese branches could not be removed:\n");
            push_list(&mut out, &report.problematic);
        }

        out.push_str("Tell everyone to run `git fetch --prune` to sync with this remote.\n");
        out.push_str("(you don't have to, yours is synced.)\n");
        out
    }
}

fn push_list(out: &mut String, references: &[BranchRef]) {
    for reference in references {
        out.push_str(&format!("  {}\n", reference));
    }
}

impl Default for CleanupReporter {
    fn default() -> Self {
        Self::new()
    }
}
