//! Checkout configuration and orchestration for subtree
//!
//! This crate sits between the CLI and the Layer 0 crates:
//!
//! ```text
//!            subtree-cli
//!                 |
//!           subtree-core
//!            /        \
//!     subtree-fs    subtree-git
//! ```
//!
//! - **Configuration**: the six-key JSON schema, accumulating validation,
//!   loading and default-file creation ([`config`])
//! - **Checkout**: the [`CheckoutEngine`] and the [`CheckoutReport`] it returns
//!
//! # Example
//!
//! ```no_run
//! use subtree_core::CheckoutEngine;
//! use subtree_git::ProcessExecutor;
//!
//! fn example() -> subtree_core::Result<()> {
//!     let root = std::env::current_dir()?;
//!     let engine = CheckoutEngine::new(root.clone(), ProcessExecutor::in_dir(root));
//!     let report = engine.run_from_file("vendor.json")?;
//!     assert!(!report.has_failures());
//!     Ok(())
//! }
//! ```

pub mod checkout;
pub mod config;
pub mod error;

pub use checkout::{CheckoutEngine, CheckoutReport, PathOutcome};
pub use config::{CheckoutConfig, ConfigStore, ValidationIssue, ValidationReport};
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_error_displays_path() {
        let error = Error::NotFound {
            path: PathBuf::from("/path/to/vendor.json"),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file '/path/to/vendor.json' not found"
        );
        assert!(error.is_configuration_error());
    }

    #[test]
    fn invalid_configuration_without_path_omits_origin() {
        let mut report = ValidationReport::default();
        report.push(ValidationIssue::EmptyRemoteName);
        let error = Error::InvalidConfiguration { path: None, report };
        assert_eq!(
            error.to_string(),
            "Configuration is invalid: 'remote_name' must not be empty"
        );
    }

    #[test]
    fn remote_collision_is_not_a_configuration_error() {
        let error = Error::RemoteExists {
            name: "subtree".into(),
        };
        assert!(!error.is_configuration_error());
    }
}
