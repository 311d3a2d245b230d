//! Moving checked-out files and folders to their destinations
//!
//! Folders are never renamed as a whole. Each regular file is moved to the
//! mirrored location under the destination, so an existing destination tree
//! is merged into rather than replaced, and the emptied source tree is
//! removed afterwards.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::MoveError;
use crate::tree;
use crate::NormalizedPath;

/// Move a file or folder from `source` to `destination`.
///
/// Moving a path onto itself is a no-op.
///
/// # Errors
///
/// - [`MoveError::SourceMissing`] if `source` does not exist
/// - [`MoveError::DestinationInsideSource`] if a folder would be moved into
///   its own subtree
/// - [`MoveError::Io`] if creating directories or renaming fails
pub fn move_path(source: &NormalizedPath, destination: &NormalizedPath) -> Result<(), MoveError> {
    let source_path = source.to_native();
    let destination_path = destination.to_native();

    let meta = match fs::symlink_metadata(&source_path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MoveError::SourceMissing { path: source_path });
        }
        Err(e) => return Err(MoveError::io(source_path, e)),
    };

    if same_location(&source_path, &destination_path) {
        tracing::debug!(path = %source, "Source and destination are identical, nothing to move");
        return Ok(());
    }

    if meta.is_dir() {
        if is_inside(&destination_path, &source_path) {
            return Err(MoveError::DestinationInsideSource {
                from: source_path,
                into: destination_path,
            });
        }
        move_folder(&source_path, &destination_path)
    } else {
        move_file(&source_path, &destination_path)
    }
}

/// Move every file below `source` into `destination`, then remove the
/// emptied `source` tree deepest-first.
fn move_folder(source: &Path, destination: &Path) -> Result<(), MoveError> {
    let entries = tree::walk(source).map_err(|e| MoveError::io(source, e))?;

    for entry in entries.iter().filter(|entry| !entry.is_dir) {
        let relative = entry
            .path
            .strip_prefix(source)
            .map_err(|_| MoveError::io(&entry.path, std::io::Error::other("entry escaped source folder")))?;
        move_file(&entry.path, &destination.join(relative))?;
    }

    for dir in entries.iter().rev().filter(|entry| entry.is_dir) {
        fs::remove_dir(&dir.path).map_err(|e| MoveError::io(&dir.path, e))?;
    }
    fs::remove_dir(source).map_err(|e| MoveError::io(source, e))?;

    Ok(())
}

/// Move a single file, replacing any file already at `destination`.
fn move_file(source: &Path, destination: &Path) -> Result<(), MoveError> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| MoveError::io(parent, e))?;
    }

    tracing::debug!(
        from = %source.display(),
        to = %destination.display(),
        "Moving file"
    );
    fs::rename(source, destination).map_err(|e| MoveError::io(source, e))
}

fn same_location(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Whether `candidate` lies strictly below `folder`. `candidate` need not
/// exist yet.
fn is_inside(candidate: &Path, folder: &Path) -> bool {
    let Ok(folder) = dunce::canonicalize(folder) else {
        return false;
    };
    let candidate = resolve(candidate);
    candidate != folder && candidate.starts_with(&folder)
}

/// Canonicalize the longest existing ancestor of `path` and re-append the
/// remaining components lexically.
fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut existing = absolute.as_path();
    let mut remainder = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            let mut resolved = canonical;
            for component in remainder.iter().rev() {
                push_component(&mut resolved, *component);
            }
            return resolved;
        }
        match (existing.parent(), existing.components().next_back()) {
            (Some(parent), Some(last)) => {
                remainder.push(last);
                existing = parent;
            }
            _ => return absolute,
        }
    }
}

fn push_component(path: &mut PathBuf, component: Component<'_>) {
    match component {
        Component::ParentDir => {
            path.pop();
        }
        Component::CurDir => {}
        other => path.push(other.as_os_str()),
    }
}
