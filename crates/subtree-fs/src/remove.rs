//! Removing cleanup targets

use std::fs;

use crate::error::DeleteError;
use crate::tree;
use crate::NormalizedPath;

/// Delete a file or a folder with all of its contents.
///
/// A folder is scanned for read-only entries before anything is removed, so
/// a read-only entry anywhere in the tree leaves the whole tree in place.
///
/// # Errors
///
/// - [`DeleteError::Missing`] if `path` does not exist
/// - [`DeleteError::ReadOnly`] if `path` or an entry below it is read-only
/// - [`DeleteError::Io`] if the removal itself fails
pub fn delete_path(path: &NormalizedPath) -> Result<(), DeleteError> {
    let native = path.to_native();

    let meta = match fs::symlink_metadata(&native) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeleteError::Missing { path: native });
        }
        Err(e) => return Err(DeleteError::io(native, e)),
    };

    if tree::is_readonly(&meta) {
        return Err(DeleteError::ReadOnly { path: native });
    }

    if meta.is_dir() {
        let entries = tree::walk(&native).map_err(|e| DeleteError::io(&native, e))?;
        if let Some(locked) = entries.into_iter().find(|entry| entry.readonly) {
            return Err(DeleteError::ReadOnly { path: locked.path });
        }
        tracing::debug!(path = %path, "Removing folder");
        fs::remove_dir_all(&native).map_err(|e| DeleteError::io(native, e))
    } else {
        tracing::debug!(path = %path, "Removing file");
        fs::remove_file(&native).map_err(|e| DeleteError::io(native, e))
    }
}
