//! The git operations a subtree checkout needs

use crate::{CommandOutput, CommandRunner, Result};

/// Git commands issued through a [`CommandRunner`].
///
/// Every method returns the captured output of the command it ran; none of
/// them inspect the exit status.
#[derive(Debug, Clone)]
pub struct Git<R> {
    runner: R,
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `git remote add <name> <url>`
    pub fn add_remote(&self, name: &str, url: &str) -> Result<CommandOutput> {
        self.git(&["remote", "add", name, url], true)
    }

    /// `git fetch <name>`
    pub fn fetch(&self, name: &str) -> Result<CommandOutput> {
        self.git(&["fetch", name], true)
    }

    /// Full commit hash at the tip of `<name>/<branch>`.
    ///
    /// Returns `None` when the ref cannot be resolved.
    pub fn head_commit(&self, name: &str, branch: &str) -> Result<Option<String>> {
        let reference = remote_ref(name, branch);
        let output = self.git(&["log", "-n", "1", &reference, "--pretty=format:%H"], false)?;
        let hash = output.stdout.trim();
        if output.success() && !hash.is_empty() {
            Ok(Some(hash.to_string()))
        } else {
            Ok(None)
        }
    }

    /// `git checkout <name>/<branch> -- <path>`
    pub fn checkout_path(&self, name: &str, branch: &str, path: &str) -> Result<CommandOutput> {
        let reference = remote_ref(name, branch);
        self.git(&["checkout", &reference, "--", path], true)
    }

    /// `git reset`, unstaging everything the checkouts added to the index.
    pub fn unstage_all(&self) -> Result<CommandOutput> {
        self.git(&["reset"], true)
    }

    /// `git remote remove <name>`
    pub fn remove_remote(&self, name: &str) -> Result<CommandOutput> {
        self.git(&["remote", "remove", name], true)
    }

    /// Names of the configured remotes.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let output = self.git(&["remote"], false)?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn git(&self, args: &[&str], verbose: bool) -> Result<CommandOutput> {
        let mut command = Vec::with_capacity(args.len() + 1);
        command.push("git");
        command.extend_from_slice(args);
        self.runner.run(&command, verbose)
    }
}

/// `<name>/<branch>`, the remote-tracking ref created by a fetch.
pub fn remote_ref(name: &str, branch: &str) -> String {
    format!("{}/{}", name, branch)
}
