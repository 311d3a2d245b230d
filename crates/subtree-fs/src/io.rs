//! Durable writes of configuration files
//!
//! Configuration files are small and edited by hand between runs. Writes
//! either replace a file in one rename or create one that did not exist,
//! never leaving a truncated file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Temp file next to the target so the final rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Replace `path` with `content` atomically.
///
/// Writes a locked temp file, syncs it, then renames it over the target.
/// Missing parent directories are created, and an existing target's
/// permissions carry over to the new file. On failure the temp file is
/// removed and the target is left untouched.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    create_parent(&native_path)?;

    let temp_path = temp_path_for(&native_path);
    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))
        .and_then(|mut file| write_locked(&mut file, &temp_path, &native_path, content))
        .and_then(|()| carry_permissions(&native_path, &temp_path))
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Create `path` with `content`, failing if it already exists.
///
/// Unlike an existence check followed by [`write_atomic`], a file that
/// appears concurrently is never overwritten.
///
/// # Errors
///
/// [`Error::AlreadyExists`] if `path` exists, otherwise I/O or lock errors.
/// A partially written file is removed.
pub fn write_new(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    create_parent(&native_path)?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&native_path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::AlreadyExists { path: native_path });
        }
        Err(e) => return Err(Error::io(&native_path, e)),
    };

    let result = write_locked(&mut file, &native_path, &native_path, content);
    if result.is_err() {
        drop(file);
        let _ = fs::remove_file(&native_path);
    }
    result
}

fn write_locked(file: &mut File, written: &Path, target: &Path, content: &[u8]) -> Result<()> {
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    file.write_all(content).map_err(|e| Error::io(written, e))?;
    file.sync_all().map_err(|e| Error::io(written, e))?;

    file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}

fn carry_permissions(target: &Path, temp_path: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(meta) => {
            fs::set_permissions(temp_path, meta.permissions()).map_err(|e| Error::io(temp_path, e))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(target, e)),
    }
}

/// Read a whole text file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
