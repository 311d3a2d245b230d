//! Validation of configuration documents
//!
//! Every problem is collected before reporting, so a user fixing a file sees
//! all missing keys at once instead of one per attempt.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::schema::{REQUIRED_KEYS, keys};

/// One problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The document is not a JSON object
    NotAnObject,
    MissingKey { key: String },
    WrongType { key: String, expected: &'static str },
    EmptyRemoteName,
    /// A path list entry that names no path, e.g. `""` or `"./"`
    EmptyPath { key: String, index: usize },
    /// `destination_paths` is non-empty but not the same length as `source_paths`
    PathCountMismatch { sources: usize, destinations: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "configuration must be a JSON object"),
            Self::MissingKey { key } => write!(f, "missing key '{key}'"),
            Self::WrongType { key, expected } => write!(f, "'{key}' must be {expected}"),
            Self::EmptyRemoteName => write!(f, "'{}' must not be empty", keys::REMOTE_NAME),
            Self::EmptyPath { key, index } => {
                write!(f, "'{key}' entry {index} does not name a path")
            }
            Self::PathCountMismatch {
                sources,
                destinations,
            } => write!(
                f,
                "{sources} source path(s) but {destinations} destination path(s)"
            ),
        }
    }
}

/// All problems found in one configuration. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Report every entry of the `key` list that names no path.
    pub(crate) fn check_paths<'a>(
        &mut self,
        key: &str,
        paths: impl IntoIterator<Item = (usize, &'a str)>,
    ) {
        for (index, path) in paths {
            if is_blank_path(path) {
                tracing::error!(key, index, "Configuration path entry is empty");
                self.push(ValidationIssue::EmptyPath {
                    key: key.to_string(),
                    index,
                });
            }
        }
    }

    /// Keys reported as missing, in the order they were checked.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::MissingKey { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Validate a parsed configuration document.
///
/// Checks every required key and its type, then, independently, the
/// source/destination length invariant when both lists are usable.
pub fn validate_document(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(object) = document.as_object() else {
        report.push(ValidationIssue::NotAnObject);
        return report;
    };

    for key in REQUIRED_KEYS {
        let Some(value) = object.get(key) else {
            tracing::error!(key, "Configuration is missing a required key");
            report.push(ValidationIssue::MissingKey {
                key: key.to_string(),
            });
            continue;
        };

        let well_typed = if is_list_key(key) {
            value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string))
        } else {
            value.is_string()
        };
        if !well_typed {
            let expected = if is_list_key(key) {
                "a list of strings"
            } else {
                "a string"
            };
            tracing::error!(key, expected, "Configuration value has the wrong type");
            report.push(ValidationIssue::WrongType {
                key: key.to_string(),
                expected,
            });
        }
    }

    if object
        .get(keys::REMOTE_NAME)
        .and_then(Value::as_str)
        .is_some_and(|name| name.trim().is_empty())
    {
        report.push(ValidationIssue::EmptyRemoteName);
    }
    for key in [keys::SOURCE_PATHS, keys::DESTINATION_PATHS, keys::CLEANUP_PATHS] {
        if let Some(items) = object.get(key).and_then(Value::as_array) {
            let paths = items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| item.as_str().map(|path| (index, path)));
            report.check_paths(key, paths);
        }
    }

    let sources = object.get(keys::SOURCE_PATHS).and_then(Value::as_array);
    let destinations = object.get(keys::DESTINATION_PATHS).and_then(Value::as_array);
    if let (Some(sources), Some(destinations)) = (sources, destinations)
        && !destinations.is_empty()
        && sources.len() != destinations.len()
    {
        tracing::error!(
            sources = sources.len(),
            destinations = destinations.len(),
            "Configuration does not have the same number of source and destination paths"
        );
        report.push(ValidationIssue::PathCountMismatch {
            sources: sources.len(),
            destinations: destinations.len(),
        });
    }

    report
}

/// Whether `path` resolves to its base, i.e. would name the working tree
/// itself: empty, `.`, or only `./` segments and separators.
pub(crate) fn is_blank_path(path: &str) -> bool {
    let separators: &[char] = if cfg!(windows) { &['/', '\\'] } else { &['/'] };
    let mut rest = path.trim();
    loop {
        rest = rest.trim_end_matches(separators);
        match rest.strip_prefix('.').filter(|after| after.starts_with(separators)) {
            Some(after) => rest = after.trim_start_matches(separators),
            None => break,
        }
    }
    rest.is_empty() || rest == "."
}

fn is_list_key(key: &str) -> bool {
    matches!(
        key,
        keys::SOURCE_PATHS | keys::DESTINATION_PATHS | keys::CLEANUP_PATHS
    )
}
