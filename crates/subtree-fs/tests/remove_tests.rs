//! Behaviour of file and folder deletion

use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::Path;
use subtree_fs::{DeleteError, NormalizedPath, delete_path};

fn set_readonly(path: &Path, readonly: bool) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_readonly(readonly);
    fs::set_permissions(path, perms).unwrap();
}

#[test]
fn delete_file_removes_it() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.txt").write_str("a").unwrap();

    delete_path(&NormalizedPath::new(temp.child("a.txt").path())).unwrap();

    temp.child("a.txt").assert(predicate::path::missing());
}

#[test]
fn delete_empty_folder_removes_it() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("lib").create_dir_all().unwrap();

    delete_path(&NormalizedPath::new(temp.child("lib").path())).unwrap();

    temp.child("lib").assert(predicate::path::missing());
}

#[test]
fn delete_populated_folder_removes_all_contents() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("lib/a.txt").write_str("a").unwrap();
    temp.child("lib/deep/er/b.txt").write_str("b").unwrap();

    delete_path(&NormalizedPath::new(temp.child("lib").path())).unwrap();

    temp.child("lib").assert(predicate::path::missing());
}

#[rstest]
#[case::file("missing.txt")]
#[case::folder("missing_folder")]
#[case::nested("no/such/thing")]
fn delete_missing_path_is_an_error(#[case] name: &str) {
    let temp = assert_fs::TempDir::new().unwrap();

    let result = delete_path(&NormalizedPath::new(temp.child(name).path()));

    assert!(matches!(result, Err(DeleteError::Missing { .. })));
}

#[test]
fn delete_readonly_file_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("locked.txt");
    file.write_str("locked").unwrap();
    set_readonly(file.path(), true);

    let result = delete_path(&NormalizedPath::new(file.path()));

    set_readonly(file.path(), false);
    assert!(matches!(result, Err(DeleteError::ReadOnly { .. })));
    file.assert("locked");
}

#[test]
fn delete_readonly_folder_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("locked/a.txt").write_str("a").unwrap();
    set_readonly(temp.child("locked").path(), true);

    let result = delete_path(&NormalizedPath::new(temp.child("locked").path()));

    set_readonly(temp.child("locked").path(), false);
    assert!(matches!(result, Err(DeleteError::ReadOnly { .. })));
    temp.child("locked/a.txt").assert("a");
}

#[test]
fn delete_folder_with_readonly_entry_leaves_tree_intact() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("lib/a.txt").write_str("a").unwrap();
    temp.child("lib/sub/locked.txt").write_str("locked").unwrap();
    set_readonly(temp.child("lib/sub/locked.txt").path(), true);

    let result = delete_path(&NormalizedPath::new(temp.child("lib").path()));

    set_readonly(temp.child("lib/sub/locked.txt").path(), false);
    match result {
        Err(DeleteError::ReadOnly { path }) => assert!(path.ends_with("locked.txt")),
        other => panic!("expected ReadOnly error, got {other:?}"),
    }
    temp.child("lib/a.txt").assert("a");
    temp.child("lib/sub/locked.txt").assert("locked");
}

#[cfg(unix)]
#[test]
fn delete_backslash_name_removes_only_that_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a\\b").write_str("literal").unwrap();
    temp.child("a/b").write_str("nested").unwrap();

    delete_path(&NormalizedPath::new(temp.child("a\\b").path())).unwrap();

    temp.child("a\\b").assert(predicate::path::missing());
    temp.child("a/b").assert("nested");
}
