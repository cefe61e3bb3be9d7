use super::repository::{execute_git_command, GitRepository};
use crate::utils::error::{CleanerError, Result};
use chrono::{Local, TimeZone};
use std::process::Command;

/// An instant resolved from a user-supplied date expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub epoch: i64,
    pub human: String,
}

pub struct HistoryManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> HistoryManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    /// Subject lines of commits older than `before` whose message matches `grep`.
    pub fn search_merge_commits(&self, grep: &str, before: &str) -> Result<Vec<String>> {
        let grep_arg = format!("--grep={}", grep);
        let before_arg = format!("--before={}", before);
        let output = execute_git_command(
            self.repo,
            &["log", &grep_arg, &before_arg, "--pretty=format:%s"],
        )?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Resolves relative ("3 months ago") and absolute ("2023-01-01") expressions
/// with GNU `date`, then renders the label from that same epoch.
pub fn resolve_period(expression: &str) -> Result<ResolvedPeriod> {
    let output = Command::new("date")
        .arg(format!("--date={}", expression))
        .arg("+%s")
        .output()
        .map_err(|e| CleanerError::invalid_period(expression, format!("cannot run date: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CleanerError::invalid_period(expression, stderr.trim()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let epoch: i64 = stdout.trim().parse().map_err(|_| {
        CleanerError::invalid_period(expression, format!("unexpected output '{}'", stdout.trim()))
    })?;

    Ok(ResolvedPeriod {
        epoch,
        human: human_label(epoch)?,
    })
}

pub fn human_label(epoch: i64) -> Result<String> {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|instant| instant.format("%a %b %e %H:%M:%S %z %Y").to_string())
        .ok_or_else(|| {
            CleanerError::invalid_period(epoch.to_string(), "timestamp out of range")
        })
}
