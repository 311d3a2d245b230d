//! Filesystem operations for subtree checkouts
//!
//! Relocates checked-out files and folders inside a working tree, removes
//! staging leftovers, and provides the small amount of atomic text I/O the
//! configuration layer needs.

pub mod error;
pub mod io;
pub mod path;
pub mod relocate;
pub mod remove;
mod tree;

pub use error::{DeleteError, Error, MoveError, Result};
pub use path::NormalizedPath;
pub use relocate::move_path;
pub use remove::delete_path;
