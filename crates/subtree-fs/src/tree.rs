//! Recursive directory listing shared by folder moves and deletes

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One entry below a walked root. Symlinks are never followed and are
/// reported as non-directories.
#[derive(Debug, Clone)]
pub(crate) struct TreeEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub readonly: bool,
}

/// List every entry below `root` in pre-order (a directory precedes its
/// contents). Siblings are sorted by name so moves happen in a stable order.
/// `root` itself is not included.
pub(crate) fn walk(root: &Path) -> io::Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    walk_into(root, &mut entries)?;
    Ok(entries)
}

fn walk_into(dir: &Path, entries: &mut Vec<TreeEntry>) -> io::Result<()> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    children.sort();

    for path in children {
        let meta = fs::symlink_metadata(&path)?;
        let is_dir = meta.is_dir();
        entries.push(TreeEntry {
            path: path.clone(),
            is_dir,
            readonly: is_readonly(&meta),
        });
        if is_dir {
            walk_into(&path, entries)?;
        }
    }
    Ok(())
}

/// Symlink permissions are meaningless on most platforms, so links never
/// count as read-only.
pub(crate) fn is_readonly(meta: &fs::Metadata) -> bool {
    !meta.file_type().is_symlink() && meta.permissions().readonly()
}
