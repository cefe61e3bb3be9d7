use crate::core::git::RepositoryOps;
use crate::utils::{CleanerError, Result};

/// The instant before which a branch counts as stale.
///
/// `cutoff_epoch` and `human_label` come from one resolution and describe the
/// same instant. `expression` is kept verbatim so history searches can be
/// bounded by the same window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionWindow {
    cutoff_epoch: i64,
    human_label: String,
    expression: String,
}

impl RetentionWindow {
    pub fn resolve<R: RepositoryOps + ?Sized>(repo: &R, expression: &str) -> Result<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(CleanerError::invalid_period(
                expression,
                "period cannot be empty",
            ));
        }

        let resolved = repo.resolve_period(expression).map_err(|e| match e {
            CleanerError::InvalidPeriod { .. } => e,
            other => CleanerError::invalid_period(expression, other.to_string()),
        })?;

        tracing::debug!(
            expression,
            cutoff = resolved.epoch,
            label = %resolved.human,
            "resolved retention window"
        );

        Ok(Self {
            cutoff_epoch: resolved.epoch,
            human_label: resolved.human,
            expression: expression.to_string(),
        })
    }

    pub fn cutoff_epoch(&self) -> i64 {
        self.cutoff_epoch
    }

    pub fn human_label(&self) -> &str {
        &self.human_label
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Strictly older than the cutoff; activity exactly at the cutoff is fresh.
    pub fn is_stale(&self, last_activity_epoch: i64) -> bool {
        last_activity_epoch < self.cutoff_epoch
    }
}
