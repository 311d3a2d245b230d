use std::fs;
use subtree_fs::{Error, NormalizedPath, io};
use tempfile::TempDir;

#[test]
fn write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("configs/nested/vendor.json"));

    io::write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("vendor.json");
    fs::write(&file_path, "original").unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    io::write_atomic(&NormalizedPath::new(temp.path().join("vendor.json")), b"{}").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[cfg(unix)]
#[test]
fn write_atomic_keeps_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("vendor.json");
    fs::write(&file_path, "{}").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o600)).unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"{ }").unwrap();

    let mode = fs::metadata(&file_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn write_new_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("configs/vendor.json"));

    io::write_new(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn write_new_refuses_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("vendor.json");
    fs::write(&file_path, "hand edited").unwrap();

    let result = io::write_new(&NormalizedPath::new(&file_path), b"{}");

    assert!(matches!(result, Err(Error::AlreadyExists { path }) if path == file_path));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "hand edited");
}

#[test]
fn read_text_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&NormalizedPath::new(temp.path().join("nope.json")));
    assert!(matches!(result, Err(Error::Io { .. })));
}
