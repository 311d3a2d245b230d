//! [`TestRepo`] builder for checkout scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::git;

/// A temporary directory holding a working tree and, optionally, an upstream
/// repository to check files out from.
///
/// # Example
///
/// ```rust,no_run
/// use subtree_test_utils::repo::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.init_git();
/// let url = repo.init_upstream("develop", &[("lib/a/x.txt", "x")]);
/// repo.write_file("checkout.json", "{}");
/// repo.assert_file_exists("checkout.json");
/// # let _ = url;
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
    work: PathBuf,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Create an empty temporary layout with `work/` as the working tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let work = temp_dir.path().join("work");
        fs::create_dir(&work).unwrap();
        Self { temp_dir, work }
    }

    /// Root of the working tree.
    pub fn root(&self) -> &Path {
        &self.work
    }

    /// Initialise the working tree as a git repository with one commit.
    pub fn init_git(&self) {
        git::real_git_repo_with_commit(self.root());
    }

    /// Create an upstream repository beside the working tree with `files`
    /// committed on `branch`. Returns its location, usable as a remote URL.
    pub fn init_upstream(&self, branch: &str, files: &[(&str, &str)]) -> String {
        let upstream = self.upstream_path();
        git::init_repo(&upstream, branch);
        git::commit_files(&upstream, files, "Upstream content");
        upstream.to_string_lossy().into_owned()
    }

    pub fn upstream_path(&self) -> PathBuf {
        self.temp_dir.path().join("upstream")
    }

    /// Write `content` to `path` (relative to the working tree), creating
    /// parent directories.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
