//! Error types for subtree-fs

use std::path::PathBuf;

/// Result type for subtree-fs I/O operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the text I/O helpers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure to relocate a file or folder.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("Cannot move '{path}': source does not exist")]
    SourceMissing { path: PathBuf },

    #[error("Cannot move '{from}' into '{into}': destination is inside the source folder")]
    DestinationInsideSource { from: PathBuf, into: PathBuf },

    #[error("Failed to move '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MoveError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure to remove a file or folder.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("Cannot delete '{path}': path does not exist")]
    Missing { path: PathBuf },

    #[error("Cannot delete '{path}': entry is read-only")]
    ReadOnly { path: PathBuf },

    #[error("Failed to delete '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeleteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
