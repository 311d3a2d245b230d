//! End-to-end checkout scenarios against real git repositories
//!
//! Each test builds an upstream repository with content on `develop`, a
//! working tree on `main`, and runs the engine with the real process
//! executor.

use std::fs;

use pretty_assertions::assert_eq;
use subtree_core::checkout::{CheckoutEngine, PathOutcome};
use subtree_core::{CheckoutConfig, Error, config};
use subtree_git::ProcessExecutor;
use subtree_test_utils::git::{remote_names, run_git, staged_paths};
use subtree_test_utils::repo::TestRepo;

fn engine(repo: &TestRepo) -> CheckoutEngine<ProcessExecutor> {
    CheckoutEngine::new(repo.root(), ProcessExecutor::in_dir(repo.root()))
}

fn upstream_with_lib(repo: &TestRepo) -> String {
    repo.init_git();
    repo.init_upstream(
        "develop",
        &[
            ("lib/a/x.txt", "x"),
            ("lib/a/nested/z.txt", "z"),
            ("lib/b/y.txt", "y"),
            ("docs/readme.md", "upstream docs"),
        ],
    )
}

fn vendor_config(url: String) -> CheckoutConfig {
    CheckoutConfig {
        remote_name: "subtree".into(),
        remote_url: url,
        branch: "develop".into(),
        source_paths: vec!["lib/a".into(), "lib/b".into()],
        destination_paths: vec!["vendor/a".into(), "vendor/b".into()],
        cleanup_paths: vec!["lib".into()],
    }
}

#[test]
fn full_checkout_relocates_sources_and_removes_staging() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    let expected_head = run_git(&repo.upstream_path(), &["rev-parse", "HEAD"]);

    let report = engine(&repo).run(vendor_config(url)).unwrap();

    assert!(!report.has_failures(), "{report:#?}");
    assert_eq!(report.commit.as_deref(), Some(expected_head.trim()));
    repo.assert_file_contains("vendor/a/x.txt", "x");
    repo.assert_file_contains("vendor/a/nested/z.txt", "z");
    repo.assert_file_contains("vendor/b/y.txt", "y");
    repo.assert_file_not_exists("lib");
    repo.assert_file_not_exists("docs");
    assert!(remote_names(repo.root()).is_empty());
    assert!(staged_paths(repo.root()).is_empty());
}

#[test]
fn failed_source_checkout_still_removes_remote() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    let mut config = vendor_config(url);
    config.source_paths.push("lib/missing".into());
    config.destination_paths.push("vendor/missing".into());

    let report = engine(&repo).run(config).unwrap();

    assert_eq!(report.failed_checkouts(), vec!["lib/missing"]);
    assert!(report.remote_removed);
    assert!(remote_names(repo.root()).is_empty());
    assert!(matches!(
        report.relocations[2].outcome,
        PathOutcome::Skipped { .. }
    ));
    repo.assert_file_contains("vendor/a/x.txt", "x");
}

#[test]
fn unreachable_remote_is_reported_and_cleaned_up() {
    let repo = TestRepo::new();
    repo.init_git();
    let missing = repo.upstream_path().join("nowhere");
    let config = vendor_config(missing.to_string_lossy().into_owned());

    let report = engine(&repo).run(config).unwrap();

    let fetch = report
        .commands
        .iter()
        .find(|c| c.command.starts_with("git fetch"))
        .unwrap();
    assert!(!fetch.success());
    assert_eq!(report.commit, None);
    assert_eq!(report.failed_checkouts().len(), 2);
    assert!(report.remote_removed);
    assert!(remote_names(repo.root()).is_empty());
}

#[test]
fn existing_remote_name_is_refused() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    run_git(repo.root(), &["remote", "add", "subtree", &url]);

    let error = engine(&repo).run(vendor_config(url)).unwrap_err();

    assert!(matches!(error, Error::RemoteExists { .. }));
    assert_eq!(remote_names(repo.root()), vec!["subtree"]);
    repo.assert_file_not_exists("lib");
}

#[test]
fn checkout_without_destinations_keeps_git_layout() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    let mut config = vendor_config(url);
    config.destination_paths.clear();
    config.cleanup_paths.clear();

    let report = engine(&repo).run(config).unwrap();

    assert!(!report.has_failures(), "{report:#?}");
    repo.assert_file_contains("lib/a/x.txt", "x");
    repo.assert_file_contains("lib/b/y.txt", "y");
    repo.assert_file_not_exists("vendor");
}

#[test]
fn run_from_file_drives_the_same_checkout() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    let path = repo.root().join("vendor.json");
    config::save(&path, &vendor_config(url)).unwrap();

    let report = engine(&repo).run_from_file(&path).unwrap();

    assert!(!report.has_failures(), "{report:#?}");
    repo.assert_file_contains("vendor/b/y.txt", "y");
}

#[test]
fn rerun_overwrites_previous_relocation() {
    let repo = TestRepo::new();
    let url = upstream_with_lib(&repo);
    let config = vendor_config(url);
    engine(&repo).run(config.clone()).unwrap();
    fs::write(repo.root().join("vendor/a/x.txt"), "local edit").unwrap();

    let report = engine(&repo).run(config).unwrap();

    assert!(!report.has_failures(), "{report:#?}");
    assert_eq!(repo.read_file("vendor/a/x.txt"), "x");
}
