//! The checkout configuration schema

use serde::{Deserialize, Serialize};

use super::validate::{ValidationIssue, ValidationReport};
use keys::{CLEANUP_PATHS, DESTINATION_PATHS, SOURCE_PATHS};

/// Key names of the configuration file.
pub mod keys {
    pub const REMOTE_NAME: &str = "remote_name";
    pub const REMOTE_URL: &str = "remote_url";
    pub const BRANCH: &str = "branch";
    pub const SOURCE_PATHS: &str = "source_paths";
    pub const DESTINATION_PATHS: &str = "destination_paths";
    pub const CLEANUP_PATHS: &str = "cleanup_paths";
}

/// Every key a configuration file must define, in file order.
pub const REQUIRED_KEYS: [&str; 6] = [
    keys::REMOTE_NAME,
    keys::REMOTE_URL,
    keys::BRANCH,
    keys::SOURCE_PATHS,
    keys::DESTINATION_PATHS,
    keys::CLEANUP_PATHS,
];

/// Description of one checkout operation.
///
/// `destination_paths` pairs positionally with `source_paths`; when it is
/// empty the checked-out sources stay where git put them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Name of the transient remote registered for the run
    pub remote_name: String,
    pub remote_url: String,
    pub branch: String,
    /// Repository-relative files or folders to check out
    pub source_paths: Vec<String>,
    /// Local destinations for `source_paths`, or empty for no relocation
    pub destination_paths: Vec<String>,
    /// Local paths deleted after relocation
    pub cleanup_paths: Vec<String>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            remote_name: "subtree".to_string(),
            remote_url: String::new(),
            branch: "develop".to_string(),
            source_paths: Vec::new(),
            destination_paths: Vec::new(),
            cleanup_paths: Vec::new(),
        }
    }
}

impl CheckoutConfig {
    /// Check the invariants that hold regardless of how the value was built.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.remote_name.trim().is_empty() {
            report.push(ValidationIssue::EmptyRemoteName);
        }
        for (key, paths) in [
            (SOURCE_PATHS, &self.source_paths),
            (DESTINATION_PATHS, &self.destination_paths),
            (CLEANUP_PATHS, &self.cleanup_paths),
        ] {
            report.check_paths(key, paths.iter().map(String::as_str).enumerate());
        }
        if !self.destination_paths.is_empty()
            && self.destination_paths.len() != self.source_paths.len()
        {
            report.push(ValidationIssue::PathCountMismatch {
                sources: self.source_paths.len(),
                destinations: self.destination_paths.len(),
            });
        }
        report
    }

    /// `(source, destination)` pairs to relocate, in order.
    ///
    /// Pairing stops at the shorter list.
    pub fn relocations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.source_paths
            .iter()
            .zip(&self.destination_paths)
            .map(|(source, destination)| (source.as_str(), destination.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_matches_documented_values() {
        let config = CheckoutConfig::default();
        assert_eq!(config.remote_name, "subtree");
        assert_eq!(config.remote_url, "");
        assert_eq!(config.branch, "develop");
        assert!(config.source_paths.is_empty());
        assert!(config.destination_paths.is_empty());
        assert!(config.cleanup_paths.is_empty());
    }

    #[test]
    fn default_is_valid() {
        assert!(CheckoutConfig::default().validate().is_valid());
    }

    #[test]
    fn blank_remote_name_is_invalid() {
        let config = CheckoutConfig {
            remote_name: "  ".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate().issues(),
            &[ValidationIssue::EmptyRemoteName]
        );
    }

    #[test]
    fn blank_cleanup_entry_is_invalid() {
        let config = CheckoutConfig {
            cleanup_paths: vec!["lib".into(), "".into()],
            ..Default::default()
        };
        assert_eq!(
            config.validate().issues(),
            &[ValidationIssue::EmptyPath {
                key: "cleanup_paths".into(),
                index: 1
            }]
        );
    }

    #[test]
    fn relocations_pair_positionally() {
        let config = CheckoutConfig {
            source_paths: vec!["lib/a".into(), "lib/b".into()],
            destination_paths: vec!["vendor/a".into(), "vendor/b".into()],
            ..Default::default()
        };
        let pairs: Vec<_> = config.relocations().collect();
        assert_eq!(pairs, vec![("lib/a", "vendor/a"), ("lib/b", "vendor/b")]);
    }

    #[test]
    fn no_relocations_without_destinations() {
        let config = CheckoutConfig {
            source_paths: vec!["lib/a".into()],
            ..Default::default()
        };
        assert_eq!(config.relocations().count(), 0);
    }
}
