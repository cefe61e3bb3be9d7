use crate::cli::parser::Cli;
use crate::config::validation::validate_backup_remote;
use crate::config::Config;
use crate::core::git::{GitRepository, RepositoryOps};
use crate::core::{BackupTarget, CleanupOrchestrator, CleanupReport, RunContext, RunOptions};
use crate::utils::{CleanerError, Result};

pub mod interaction;
pub mod reporter;

use interaction::CleanupInteraction;
use reporter::CleanupReporter;

pub fn execute(config: Config, args: Cli) -> Result<()> {
    let repo = GitRepository::discover()?;
    repo.validate()?;

    let options = resolve_options(&config, &args);
    let flags = CleanFlags::from(&args);

    let outcome = BranchCleaner::new(&repo, options, flags).execute()?;
    tracing::debug!(outcome = ?outcome, "clean finished");
    Ok(())
}

/// Merges command-line values over the config file. Whitelists are unioned.
pub fn resolve_options(config: &Config, args: &Cli) -> RunOptions {
    let mut whitelist = config.defaults.whitelist.clone();
    for name in &args.whitelist {
        if !whitelist.contains(name) {
            whitelist.push(name.clone());
        }
    }

    RunOptions {
        period: args.period.trim().to_string(),
        merge_status: args.merge_status,
        target_branch: args
            .target
            .clone()
            .unwrap_or_else(|| config.target_branch().to_string()),
        source_remote: args
            .source
            .clone()
            .unwrap_or_else(|| config.source_remote().to_string()),
        backup_remote: args
            .backup
            .clone()
            .or_else(|| config.backup_remote().map(str::to_string)),
        whitelist,
        temp_branch_prefix: config.temp_branch_prefix().to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanFlags {
    pub dry_run: bool,
    pub force: bool,
    pub no_fetch: bool,
}

impl From<&Cli> for CleanFlags {
    fn from(args: &Cli) -> Self {
        Self {
            dry_run: args.dry_run,
            force: args.force,
            no_fetch: args.no_fetch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    NothingToDelete,
    DryRun { candidates: usize },
    Declined,
    Completed(CleanupReport),
}

pub struct BranchCleaner<'a, R: RepositoryOps + ?Sized> {
    repo: &'a R,
    options: RunOptions,
    flags: CleanFlags,
    reporter: CleanupReporter,
}

impl<'a, R: RepositoryOps + ?Sized> BranchCleaner<'a, R> {
    pub fn new(repo: &'a R, options: RunOptions, flags: CleanFlags) -> Self {
        Self {
            repo,
            options,
            flags,
            reporter: CleanupReporter::new(),
        }
    }

    pub fn execute(&self) -> Result<CleanOutcome> {
        self.validate_backup_remote()?;

        let mut context = RunContext::prepare(self.repo, self.options.clone())?;

        self.prepare_branch()?;
        if !self.flags.no_fetch {
            self.repo.fetch(&self.options.source_remote)?;
        }

        context.build_cleaning_list(self.repo)?;
        for fresh in &context.fresh {
            tracing::debug!(branch = %fresh.reference, last_activity = fresh.last_activity_epoch, "kept, recently active");
        }

        if context.candidates.is_empty() {
            self.reporter
                .show_nothing_to_delete(&self.options.source_remote);
            return Ok(CleanOutcome::NothingToDelete);
        }

        self.reporter.show_cleaning_list(&context);

        if self.flags.dry_run {
            return Ok(CleanOutcome::DryRun {
                candidates: context.candidates.len(),
            });
        }

        if !self.flags.force {
            let interaction = CleanupInteraction::new(self.options.backup_remote.clone());
            if !interaction.confirm_deletion()? {
                return Ok(CleanOutcome::Declined);
            }
        }

        let backup = self
            .options
            .backup_remote
            .as_ref()
            .map(|remote| BackupTarget {
                remote: remote.clone(),
                temp_branch_prefix: self.options.temp_branch_prefix.clone(),
            });
        let orchestrator =
            CleanupOrchestrator::new(self.repo, &self.options.target_branch, backup);

        let report = orchestrator.run_with_progress(&context.candidates, |reference| {
            self.reporter.show_removing(reference)
        })?;
        self.reporter.show_results(&report);

        Ok(CleanOutcome::Completed(report))
    }

    fn validate_backup_remote(&self) -> Result<()> {
        let Some(backup) = &self.options.backup_remote else {
            return Ok(());
        };

        validate_backup_remote(backup, &self.options.source_remote)?;

        let remotes = self.repo.list_remotes()?;
        if !remotes.iter().any(|remote| remote == backup) {
            return Err(CleanerError::config_error(format!(
                "Backup remote '{}' is not defined. Add a remote with this name to the repository before continuing",
                backup
            )));
        }

        Ok(())
    }

    fn prepare_branch(&self) -> Result<()> {
        let current = self.repo.current_branch()?;
        if current != self.options.target_branch {
            self.reporter
                .show_checkout(&current, &self.options.target_branch);
            self.repo.checkout(&self.options.target_branch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::git::MergeStatus;
    use crate::test_utils::mock::MockRepository;
    use crate::utils::RemoteRefError;
    use clap::Parser;

    fn options(backup: Option<&str>) -> RunOptions {
        RunOptions {
            period: "3 months ago".to_string(),
            merge_status: MergeStatus::Merged,
            target_branch: "master".to_string(),
            source_remote: "origin".to_string(),
            backup_remote: backup.map(str::to_string),
            whitelist: Vec::new(),
            temp_branch_prefix: "br_clean_backup_".to_string(),
        }
    }

    fn forced() -> CleanFlags {
        CleanFlags {
            force: true,
            ..Default::default()
        }
    }

    fn stale_repo() -> MockRepository {
        MockRepository::new()
            .with_period(1_000, "cutoff")
            .with_listing(&["origin/HEAD", "->", "origin/master", "origin/foo", "origin/bar"])
            .with_commit_time("origin/foo", 10)
            .with_commit_time("origin/bar", 20)
    }

    #[test]
    fn test_resolve_options_precedence() {
        let mut config = Config::default();
        config.defaults.target_branch = "develop".to_string();
        config.defaults.backup_remote = Some("archive".to_string());
        config.defaults.whitelist = vec!["release".to_string(), "staging".to_string()];

        let args = Cli::try_parse_from([
            "branch-cleaner",
            "-t",
            "main",
            "-w",
            "staging",
            "hotfix",
            "--",
            " 2 weeks ago ",
            "both",
        ])
        .unwrap();

        let options = resolve_options(&config, &args);
        assert_eq!(options.target_branch, "main");
        assert_eq!(options.source_remote, "origin");
        assert_eq!(options.backup_remote.as_deref(), Some("archive"));
        assert_eq!(options.period, "2 weeks ago");
        assert_eq!(
            options.whitelist,
            vec!["release".to_string(), "staging".to_string(), "hotfix".to_string()]
        );
        assert_eq!(options.temp_branch_prefix, "br_clean_backup_");
    }

    #[test]
    fn test_full_run_deletes_all_candidates() {
        let repo = stale_repo();
        let outcome = BranchCleaner::new(&repo, options(None), forced())
            .execute()
            .unwrap();

        let CleanOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        let deleted: Vec<&str> = report.deleted.iter().map(|r| r.as_str()).collect();
        assert_eq!(deleted, vec!["origin/bar", "origin/foo"]);
        assert_eq!(repo.calls_starting_with("fetch "), vec!["fetch origin".to_string()]);
    }

    #[test]
    fn test_backup_equal_to_source_fails_before_fetch() {
        let repo = stale_repo();
        let result = BranchCleaner::new(&repo, options(Some("origin")), forced()).execute();

        assert!(matches!(result, Err(CleanerError::Config { .. })));
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_unknown_backup_remote_is_configuration_error() {
        let repo = stale_repo();
        let result = BranchCleaner::new(&repo, options(Some("archive")), forced()).execute();

        let error = result.unwrap_err();
        assert!(error.is_configuration());
        assert!(repo.calls_starting_with("fetch").is_empty());
        assert!(repo.calls_starting_with("delete").is_empty());
    }

    #[test]
    fn test_backup_run_copies_before_deleting() {
        let repo = stale_repo().with_remote("archive");
        let outcome = BranchCleaner::new(&repo, options(Some("archive")), forced())
            .execute()
            .unwrap();

        assert!(matches!(outcome, CleanOutcome::Completed(ref r) if r.deleted.len() == 2));
        assert_eq!(repo.calls_starting_with("push archive").len(), 2);
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let repo = stale_repo();
        let flags = CleanFlags {
            dry_run: true,
            ..Default::default()
        };

        let outcome = BranchCleaner::new(&repo, options(None), flags)
            .execute()
            .unwrap();

        assert_eq!(outcome, CleanOutcome::DryRun { candidates: 2 });
        assert!(repo.calls_starting_with("delete").is_empty());
        assert!(repo.calls_starting_with("push").is_empty());
    }

    #[test]
    fn test_nothing_to_delete() {
        let repo = MockRepository::new().with_listing(&["origin/HEAD", "->", "origin/master"]);
        let outcome = BranchCleaner::new(&repo, options(None), forced())
            .execute()
            .unwrap();
        assert_eq!(outcome, CleanOutcome::NothingToDelete);
    }

    #[test]
    fn test_switches_to_target_branch_first() {
        let repo = stale_repo().with_current_branch("feature");
        BranchCleaner::new(&repo, options(None), forced())
            .execute()
            .unwrap();

        let calls = repo.calls();
        assert_eq!(calls.first().map(String::as_str), Some("resolve 3 months ago"));
        assert_eq!(calls.get(1).map(String::as_str), Some("checkout master"));
        assert_eq!(*repo.current.borrow(), "master");
    }

    #[test]
    fn test_no_fetch_skips_fetch() {
        let repo = stale_repo();
        let flags = CleanFlags {
            force: true,
            no_fetch: true,
            ..Default::default()
        };
        BranchCleaner::new(&repo, options(None), flags)
            .execute()
            .unwrap();
        assert!(repo.calls_starting_with("fetch").is_empty());
    }

    #[test]
    fn test_fetch_failure_is_fatal() {
        let repo = stale_repo().failing_fetch();
        let result = BranchCleaner::new(&repo, options(None), forced()).execute();

        assert!(matches!(result, Err(CleanerError::GitOperation { .. })));
        assert!(repo.calls_starting_with("delete").is_empty());
    }

    #[test]
    fn test_bad_period_fails_before_checkout() {
        let repo = stale_repo()
            .with_current_branch("feature")
            .with_unresolvable_period();
        let result = BranchCleaner::new(&repo, options(None), forced()).execute();

        assert!(matches!(result, Err(CleanerError::InvalidPeriod { .. })));
        assert!(repo.calls_starting_with("checkout").is_empty());
    }

    #[test]
    fn test_per_branch_failures_do_not_fail_command() {
        let repo = stale_repo()
            .with_delete_failure("foo", RemoteRefError::ref_not_found("origin", "foo"));
        let outcome = BranchCleaner::new(&repo, options(None), forced())
            .execute()
            .unwrap();

        let CleanOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(report.already_removed.len(), 1);
        assert_eq!(report.deleted.len(), 1);
    }
}
