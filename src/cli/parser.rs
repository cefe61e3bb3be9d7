use crate::core::git::{GitValidator, MergeStatus};
use crate::utils::{CleanerError, Result};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "branch-cleaner")]
#[command(about = "Deletes stale remote branches, optionally backing them up first")]
#[command(
    version,
    long_about = "Finds remote branches whose last activity is older than PERIOD and deletes them \
                  from the source remote. Branches squashed into a release branch are found \
                  through their 'Merge branches ... into ...' commit subjects."
)]
#[command(after_help = "EXAMPLES:
    # Show merged branches untouched for three months
    branch-cleaner --dry-run \"3 months ago\" merged

    # Copy to 'backup' before deleting, protecting two extra branches
    branch-cleaner -b backup -w develop release \"2023-01-01\" both

    # Clean a fork without fetching first
    branch-cleaner --no-fetch -s upstream -t main \"6 weeks ago\" unmerged")]
pub struct Cli {
    /// Branches with no activity since this date are eligible (relative or exact)
    pub period: String,

    /// Which branches to consider, relative to the target branch
    #[arg(value_enum)]
    pub merge_status: MergeStatus,

    /// Only list the eligible branches
    #[arg(long = "dry-run", short = 'n', visible_alias = "dryrun", conflicts_with = "force")]
    pub dry_run: bool,

    /// Delete without asking for confirmation
    #[arg(long, short)]
    pub force: bool,

    /// Branch names that must never be deleted
    #[arg(long, short = 'w', num_args = 1.., value_name = "BRANCH")]
    pub whitelist: Vec<String>,

    /// Branch the merge status is checked against [default: master]
    #[arg(long, short = 't', value_name = "BRANCH")]
    pub target: Option<String>,

    /// Remote that holds the target branch and the branches to delete [default: origin]
    #[arg(long, short = 's', value_name = "REMOTE")]
    pub source: Option<String>,

    /// Already configured remote that receives a copy of every deleted branch
    #[arg(long, short = 'b', value_name = "REMOTE")]
    pub backup: Option<String>,

    /// Do not fetch the source remote first
    #[arg(long)]
    pub no_fetch: bool,

    /// Log every git invocation and classification to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.period.trim().is_empty() {
            return Err(CleanerError::invalid_args("Period cannot be empty"));
        }

        if let Some(target) = &self.target {
            GitValidator::validate_branch_name(target)
                .map_err(|e| CleanerError::invalid_args(format!("Invalid target branch: {}", e)))?;
        }

        for remote in self.source.iter().chain(self.backup.iter()) {
            GitValidator::validate_remote_name(remote)
                .map_err(|e| CleanerError::invalid_args(format!("Invalid remote: {}", e)))?;
        }

        for name in &self.whitelist {
            GitValidator::validate_branch_name(name).map_err(|e| {
                CleanerError::invalid_args(format!("Invalid whitelist entry: {}", e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["branch-cleaner", "3 months ago", "merged"]).unwrap();
        assert_eq!(cli.period, "3 months ago");
        assert_eq!(cli.merge_status, MergeStatus::Merged);
        assert!(!cli.dry_run);
        assert!(!cli.force);
        assert!(cli.whitelist.is_empty());
        assert!(cli.target.is_none());
        assert!(!cli.no_fetch);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "branch-cleaner",
            "-n",
            "-t",
            "main",
            "-s",
            "upstream",
            "-b",
            "archive",
            "--no-fetch",
            "2023-01-01",
            "both",
            "-w",
            "develop",
            "release",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.target.as_deref(), Some("main"));
        assert_eq!(cli.source.as_deref(), Some("upstream"));
        assert_eq!(cli.backup.as_deref(), Some("archive"));
        assert!(cli.no_fetch);
        assert_eq!(cli.merge_status, MergeStatus::Both);
        assert_eq!(cli.whitelist, vec!["develop".to_string(), "release".to_string()]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_dry_run_conflicts_with_force() {
        let result = Cli::try_parse_from(["branch-cleaner", "-n", "-f", "1 week ago", "merged"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_merge_status_rejected() {
        let result = Cli::try_parse_from(["branch-cleaner", "1 week ago", "squashed"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let cli = Cli::try_parse_from(["branch-cleaner", "-w", "bad name", "1 week ago", "merged"])
            .unwrap();
        assert!(matches!(cli.validate(), Err(CleanerError::InvalidArgs { .. })));

        let cli =
            Cli::try_parse_from(["branch-cleaner", "-s", "a/b", "1 week ago", "merged"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
