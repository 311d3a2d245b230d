//! CheckoutEngine implementation
//!
//! A run is a single forward pass:
//!
//! 1. validate the configuration (fatal)
//! 2. add the transient remote and fetch it
//! 3. resolve the remote branch tip for the progress log
//! 4. check out every source path, unstage, remove the remote
//! 5. relocate sources to destinations, delete cleanup paths
//!
//! Only step 1 and the remote-collision check can abort. Everything after
//! the remote is added records failures and continues, and the remote is
//! always removed once added.

use std::path::Path;

use subtree_fs::{DeleteError, MoveError, NormalizedPath, delete_path, move_path};
use subtree_git::{CommandOutput, CommandRunner, Git, git::remote_ref};

use super::report::{CheckoutReport, CommandRecord, PathOutcome, PathStep, RelocationStep};
use crate::config::{self, CheckoutConfig};
use crate::{Error, Result};

/// Runs checkouts against one working tree.
///
/// The working tree root anchors relative destination and cleanup paths.
/// Git commands are issued through `runner`, which is expected to execute
/// them inside the same working tree.
pub struct CheckoutEngine<R> {
    root: NormalizedPath,
    git: Git<R>,
}

impl<R: CommandRunner> CheckoutEngine<R> {
    pub fn new(root: impl Into<NormalizedPath>, runner: R) -> Self {
        Self {
            root: root.into(),
            git: Git::new(runner),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Load the configuration at `path` and run it.
    ///
    /// # Errors
    ///
    /// Fails before touching the repository if the configuration cannot be
    /// loaded; see [`config::load`] and [`CheckoutEngine::run`].
    pub fn run_from_file(&self, path: impl AsRef<Path>) -> Result<CheckoutReport> {
        let config = config::load(path)?;
        self.run(config)
    }

    /// Execute one checkout run for `config`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] if `config` violates its invariants
    /// - [`Error::RemoteExists`] if `remote_name` is already registered
    ///
    /// Both are detected before any remote or file is touched. Failures of
    /// individual git commands, moves and deletes are recorded in the
    /// returned report instead.
    pub fn run(&self, config: CheckoutConfig) -> Result<CheckoutReport> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(Error::InvalidConfiguration {
                path: None,
                report: validation,
            });
        }
        self.ensure_remote_is_free(&config.remote_name)?;

        let mut report = CheckoutReport::start(config);
        let config = report.config.clone();
        let name = config.remote_name.as_str();
        let branch = config.branch.as_str();

        self.record(&mut report, format!("git remote add {name}"), |git| {
            git.add_remote(name, &config.remote_url)
        });
        self.record(&mut report, format!("git fetch {name}"), |git| git.fetch(name));

        report.commit = self.git.head_commit(name, branch).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not resolve remote head");
            None
        });
        tracing::info!(
            remote = name,
            branch,
            commit = report.commit.as_deref().unwrap_or("unknown"),
            "Checking out files from {}",
            remote_ref(name, branch)
        );

        for source in &config.source_paths {
            let output = self.record(
                &mut report,
                format!("git checkout {} -- {source}", remote_ref(name, branch)),
                |git| git.checkout_path(name, branch, source),
            );
            let outcome = if output.success() {
                PathOutcome::Done
            } else {
                PathOutcome::Failed {
                    reason: failure_reason(&output),
                }
            };
            report.checkouts.push(PathStep {
                path: source.clone(),
                outcome,
            });
        }

        self.record(&mut report, "git reset".to_string(), |git| git.unstage_all());
        let removal = self.record(&mut report, format!("git remote remove {name}"), |git| {
            git.remove_remote(name)
        });
        report.remote_removed = removal.success();

        for (source, destination) in config.relocations() {
            let step = self.relocate(source, destination);
            report.relocations.push(step);
        }

        for path in &config.cleanup_paths {
            let step = self.cleanup(path);
            report.cleanups.push(step);
        }

        let report = report.finish();
        if report.has_failures() {
            tracing::warn!(
                failed_checkouts = report.failed_checkouts().len(),
                failed_steps = report.failed_steps(),
                remote_removed = report.remote_removed,
                "Checkout complete with failures"
            );
        } else {
            tracing::info!("Checkout complete!");
        }
        Ok(report)
    }

    fn ensure_remote_is_free(&self, name: &str) -> Result<()> {
        match self.git.remotes() {
            Ok(remotes) if remotes.iter().any(|r| r == name) => {
                tracing::error!(remote = name, "Remote already exists");
                Err(Error::RemoteExists {
                    name: name.to_string(),
                })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                // The commands that follow will fail and be reported the same way.
                tracing::warn!(error = %e, "Could not list remotes");
                Ok(())
            }
        }
    }

    /// Run one git step, converting a spawn failure into a failed output so
    /// the run can continue.
    fn record(
        &self,
        report: &mut CheckoutReport,
        label: String,
        step: impl FnOnce(&Git<R>) -> subtree_git::Result<CommandOutput>,
    ) -> CommandOutput {
        let output = step(&self.git).unwrap_or_else(|e| {
            tracing::error!(command = %label, error = %e, "Command could not be run");
            CommandOutput {
                stdout: String::new(),
                stderr: e.to_string(),
                status: None,
            }
        });
        report.commands.push(CommandRecord::new(label, &output));
        output
    }

    fn relocate(&self, source: &str, destination: &str) -> RelocationStep {
        let from = self.resolve(source);
        let to = self.resolve(destination);

        if from.is_dir() {
            tracing::info!(from = %from, to = %to, "Moving contents of folder");
        } else if from.exists() {
            tracing::info!(from = %from, to = %to, "Moving file");
        }

        let outcome = match move_path(&from, &to) {
            Ok(()) => PathOutcome::Done,
            Err(MoveError::SourceMissing { .. }) => {
                tracing::warn!(path = %from, "Source does not exist, skipping");
                PathOutcome::Skipped {
                    reason: "source does not exist".to_string(),
                }
            }
            Err(e) => {
                tracing::error!(from = %from, to = %to, error = %e, "Move failed");
                PathOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        RelocationStep {
            source: source.to_string(),
            destination: destination.to_string(),
            outcome,
        }
    }

    fn cleanup(&self, path: &str) -> PathStep {
        let target = self.resolve(path);
        if self.encloses_root(&target) {
            tracing::error!(path = %target, root = %self.root, "Refusing to delete the working tree");
            return PathStep {
                path: path.to_string(),
                outcome: PathOutcome::Failed {
                    reason: "path is the working tree root or contains it".to_string(),
                },
            };
        }
        tracing::info!(path = %target, "Deleting");

        let outcome = match delete_path(&target) {
            Ok(()) => PathOutcome::Done,
            Err(DeleteError::Missing { .. }) => {
                tracing::warn!(path = %target, "Cleanup target does not exist, skipping");
                PathOutcome::Skipped {
                    reason: "path does not exist".to_string(),
                }
            }
            Err(e) => {
                tracing::error!(path = %target, error = %e, "Delete failed");
                PathOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        PathStep {
            path: path.to_string(),
            outcome,
        }
    }

    /// Whether deleting `target` would take the working tree root with it.
    fn encloses_root(&self, target: &NormalizedPath) -> bool {
        if *target == self.root {
            return true;
        }
        match (
            dunce::canonicalize(target.to_native()),
            dunce::canonicalize(self.root.to_native()),
        ) {
            (Ok(target), Ok(root)) => root.starts_with(target),
            _ => false,
        }
    }

    /// Absolute configuration paths are used as given; relative ones are
    /// taken from the working tree root.
    fn resolve(&self, path: &str) -> NormalizedPath {
        if Path::new(path).is_absolute() {
            NormalizedPath::new(path)
        } else {
            self.root.join(path)
        }
    }
}

fn failure_reason(output: &CommandOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match output.status {
        Some(code) => format!("git exited with status {code}"),
        None => "git did not run to completion".to_string(),
    }
}
