//! Real git repository fixtures.
//!
//! Repositories are created with the `git` CLI (the same tool the code under
//! test drives) and inspected with `git2` so assertions don't depend on the
//! subprocess layer being tested.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run `git <args>` inside `path` and return its stdout.
///
/// # Panics
/// Panics if git cannot be started or exits unsuccessfully.
pub fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialise a repository at `path` whose unborn HEAD points at `branch`.
///
/// Configures `user.email`, `user.name` and `commit.gpgsign = false` so
/// commits work on machines without a global identity.
///
/// # Panics
/// Panics if any git operation fails.
pub fn init_repo(path: &Path, branch: &str) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("init_repo: failed to create {}: {e}", path.display()));
    run_git(path, &["init", "--quiet"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    run_git(path, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")]);
}

/// Write `files` (relative path, content) under `path` and commit them.
///
/// Returns the hash of the new commit.
///
/// # Panics
/// Panics if writing or committing fails.
pub fn commit_files(path: &Path, files: &[(&str, &str)], message: &str) -> String {
    for (relative, content) in files {
        let file = path.join(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("commit_files: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("commit_files: failed to write {}: {e}", file.display()));
    }
    run_git(path, &["add", "--all"]);
    run_git(path, &["commit", "--quiet", "-m", message]);
    run_git(path, &["rev-parse", "HEAD"]).trim().to_string()
}

/// A repository on `main` with a single `README.md` commit, the shape of a
/// typical checkout target.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    init_repo(path, "main");
    commit_files(path, &[("README.md", "# Test")], "Initial commit");
}

/// Names of the remotes configured in the repository at `path`.
///
/// # Panics
/// Panics if `path` is not a git repository.
pub fn remote_names(path: &Path) -> Vec<String> {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("remote_names: cannot open {}: {e}", path.display()));
    let remotes = repo
        .remotes()
        .unwrap_or_else(|e| panic!("remote_names: cannot list remotes: {e}"));
    remotes.iter().flatten().map(str::to_string).collect()
}

/// Paths currently staged in the index relative to HEAD.
///
/// # Panics
/// Panics if git fails.
pub fn staged_paths(path: &Path) -> Vec<String> {
    run_git(path, &["diff", "--cached", "--name-only"])
        .lines()
        .map(str::to_string)
        .collect()
}
