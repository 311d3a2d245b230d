//! Error types for subtree-core

use std::path::PathBuf;

use crate::config::ValidationReport;

/// Result type for subtree-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a checkout before the working tree or remotes change.
///
/// Per-path relocation and cleanup failures are never raised; they are
/// recorded in the [`crate::CheckoutReport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at load time
    #[error("Configuration file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    /// Missing keys, wrong value types, or mismatched path lists
    #[error("Configuration{} is invalid: {report}", describe_origin(.path))]
    InvalidConfiguration {
        path: Option<PathBuf>,
        report: ValidationReport,
    },

    /// A configuration value was requested before anything was loaded
    #[error("No configuration has been loaded")]
    EmptyConfiguration,

    /// The file is not valid JSON
    #[error("Failed to parse configuration '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The transient remote name is already taken in the target repository
    #[error("Remote '{name}' already exists; choose a different remote_name")]
    RemoteExists { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from subtree-fs
    #[error(transparent)]
    Fs(#[from] subtree_fs::Error),

    /// Process error from subtree-git
    #[error(transparent)]
    Git(#[from] subtree_git::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this belongs to the configuration family (not found, invalid,
    /// empty, unparsable).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidConfiguration { .. }
                | Self::EmptyConfiguration
                | Self::Parse { .. }
        )
    }
}

fn describe_origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}
