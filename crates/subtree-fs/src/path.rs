//! Normalized path handling for configuration-supplied paths

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// On Windows `lib\core` and `lib/core` name the same entry, so backslashes
/// are rewritten to `/`. Elsewhere a backslash is an ordinary file name
/// character and is kept. Conversion to a platform-native `PathBuf` happens
/// only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let mut normalized = to_forward_slashes(&path.as_ref().to_string_lossy());
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
        Self { inner: normalized }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    ///
    /// An empty base yields the segment itself, so paths read from a
    /// configuration file can be resolved against an optional root.
    pub fn join(&self, segment: &str) -> Self {
        let segment = to_forward_slashes(segment);
        let segment = segment.trim_start_matches("./");
        if self.inner.is_empty() || self.inner == "." {
            return Self::new(segment);
        }
        if self.inner.ends_with('/') {
            Self::new(format!("{}{}", self.inner, segment))
        } else {
            Self::new(format!("{}/{}", self.inner, segment))
        }
    }

    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present. Dotfiles such as `.gitignore` have none.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Append `.{extension}` unless the path already carries it.
    ///
    /// Unlike [`Path::with_extension`] an existing, different extension is
    /// kept: `checkout.v2` becomes `checkout.v2.json`.
    pub fn with_required_extension(&self, extension: &str) -> Self {
        if self.extension() == Some(extension) {
            self.clone()
        } else {
            Self {
                inner: format!("{}.{}", self.inner, extension),
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

fn to_forward_slashes(path: &str) -> String {
    if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
