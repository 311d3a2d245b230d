//! Git command-line invocation for subtree checkouts
//!
//! `git` is treated as an opaque external tool. Commands run as blocking
//! subprocesses with both output streams captured; a non-zero exit status is
//! reported in the [`CommandOutput`] rather than as an error, leaving the
//! interpretation to the caller.

pub mod error;
pub mod executor;
pub mod git;

pub use error::{Error, Result};
pub use executor::{CommandOutput, CommandRunner, ProcessExecutor};
pub use git::Git;
