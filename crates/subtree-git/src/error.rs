//! Error types for subtree-git

/// Result type for subtree-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent a command from running at all.
///
/// A command that runs and exits unsuccessfully is not an error; see
/// [`crate::CommandOutput::success`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot run an empty command")]
    EmptyCommand,

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
