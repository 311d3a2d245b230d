//! What one checkout run did

use chrono::{DateTime, Utc};
use serde::Serialize;
use subtree_git::CommandOutput;

use crate::config::CheckoutConfig;

/// Result of one per-path step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PathOutcome {
    Done,
    /// Nothing to do, e.g. the path did not exist
    Skipped { reason: String },
    Failed { reason: String },
}

impl PathOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A checkout or cleanup of a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub path: String,
    #[serde(flatten)]
    pub outcome: PathOutcome,
}

/// A source relocated (or not) to its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelocationStep {
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub outcome: PathOutcome,
}

/// A git command the run issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    pub command: String,
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CommandRecord {
    pub(crate) fn new(command: String, output: &CommandOutput) -> Self {
        Self {
            command,
            status: output.status,
            stderr: output.stderr.trim_end().to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Outcome of a whole checkout run.
///
/// Returned even when individual steps failed; inspect [`has_failures`]
/// to decide whether the result is usable.
///
/// [`has_failures`]: CheckoutReport::has_failures
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReport {
    /// The configuration the run executed, handed back to the caller
    pub config: CheckoutConfig,
    /// Tip of `remote_name/branch` at fetch time, when it could be resolved
    pub commit: Option<String>,
    pub commands: Vec<CommandRecord>,
    pub checkouts: Vec<PathStep>,
    pub relocations: Vec<RelocationStep>,
    pub cleanups: Vec<PathStep>,
    /// Whether `git remote remove` succeeded at the end of the run
    pub remote_removed: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CheckoutReport {
    pub(crate) fn start(config: CheckoutConfig) -> Self {
        let now = Utc::now();
        Self {
            config,
            commit: None,
            commands: Vec::new(),
            checkouts: Vec::new(),
            relocations: Vec::new(),
            cleanups: Vec::new(),
            remote_removed: false,
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// Source paths whose `git checkout` did not succeed.
    pub fn failed_checkouts(&self) -> Vec<&str> {
        self.checkouts
            .iter()
            .filter(|step| step.outcome.is_failed())
            .map(|step| step.path.as_str())
            .collect()
    }

    /// Any failed command, checkout, relocation or cleanup.
    pub fn has_failures(&self) -> bool {
        self.commands.iter().any(|c| !c.success())
            || self.failed_steps() > 0
            || !self.remote_removed
    }

    /// Count of failed per-path steps across checkouts, relocations and cleanups.
    pub fn failed_steps(&self) -> usize {
        let checkouts = self.checkouts.iter().filter(|s| s.outcome.is_failed()).count();
        let relocations = self.relocations.iter().filter(|s| s.outcome.is_failed()).count();
        let cleanups = self.cleanups.iter().filter(|s| s.outcome.is_failed()).count();
        checkouts + relocations + cleanups
    }

    /// The configuration, for reuse by a subsequent run.
    pub fn into_config(self) -> CheckoutConfig {
        self.config
    }
}
