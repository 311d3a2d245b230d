//! Loading, creating and holding configuration files

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use subtree_fs::{NormalizedPath, io};

use super::schema::CheckoutConfig;
use super::validate::validate_document;
use crate::{Error, Result};

/// Configuration files are JSON; a name without the `.json` extension gets
/// it appended.
pub fn config_file_path(path: impl AsRef<Path>) -> PathBuf {
    NormalizedPath::new(path)
        .with_required_extension("json")
        .to_native()
}

/// Load and validate a configuration file.
///
/// # Errors
///
/// - [`Error::NotFound`] if the file is absent
/// - [`Error::Parse`] if it is not valid JSON
/// - [`Error::InvalidConfiguration`] with every problem found otherwise
pub fn load(path: impl AsRef<Path>) -> Result<CheckoutConfig> {
    let path = path.as_ref();
    let file = NormalizedPath::new(path);
    tracing::info!(path = %path.display(), "Loading configuration file");

    if !file.is_file() {
        tracing::error!(path = %path.display(), "Configuration file not found");
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = io::read_text(&file)?;
    let document: Value = serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let report = validate_document(&document);
    if !report.is_valid() {
        tracing::error!(path = %path.display(), %report, "Configuration file is invalid");
        return Err(Error::InvalidConfiguration {
            path: Some(path.to_path_buf()),
            report,
        });
    }

    Ok(serde_json::from_value(document)?)
}

/// Write `config` to `path` atomically.
pub fn save(path: impl AsRef<Path>, config: &CheckoutConfig) -> Result<()> {
    io::write_atomic(&NormalizedPath::new(path), &render(config)?)?;
    Ok(())
}

/// Pretty JSON with a 4-space indent and a trailing newline.
fn render(config: &CheckoutConfig) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    config.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Write a default-valued configuration unless a file already exists at
/// `path`. Missing parent folders are created.
///
/// Returns whether a file was created.
pub fn create_default(path: impl AsRef<Path>) -> Result<bool> {
    let file = NormalizedPath::new(path);
    if file.exists() {
        tracing::debug!(path = %file, "Configuration file already exists");
        return Ok(false);
    }

    tracing::info!(path = %file, "Creating configuration file");
    match io::write_new(&file, &render(&CheckoutConfig::default())?) {
        Ok(()) => Ok(true),
        Err(subtree_fs::Error::AlreadyExists { .. }) => {
            tracing::debug!(path = %file, "Configuration file appeared while creating it");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Caller-owned holder for at most one loaded configuration.
///
/// Each `load` replaces the previous value. Accessors fail with
/// [`Error::EmptyConfiguration`] until something has been loaded.
#[derive(Debug, Default)]
pub struct ConfigStore {
    loaded: Option<CheckoutConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, replacing any configuration held so far.
    ///
    /// On error the previously loaded value is kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&CheckoutConfig> {
        let loaded: &CheckoutConfig = self.loaded.insert(load(path)?);
        Ok(loaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The loaded configuration.
    pub fn config(&self) -> Result<&CheckoutConfig> {
        self.loaded.as_ref().ok_or_else(|| {
            tracing::error!("Unable to retrieve configuration values: no configuration loaded");
            Error::EmptyConfiguration
        })
    }

    /// Hand the loaded configuration over, leaving the store empty.
    pub fn take(&mut self) -> Result<CheckoutConfig> {
        self.loaded.take().ok_or(Error::EmptyConfiguration)
    }

    pub fn remote_name(&self) -> Result<&str> {
        Ok(self.config()?.remote_name.as_str())
    }

    pub fn remote_url(&self) -> Result<&str> {
        Ok(self.config()?.remote_url.as_str())
    }

    pub fn branch(&self) -> Result<&str> {
        Ok(self.config()?.branch.as_str())
    }

    pub fn source_paths(&self) -> Result<&[String]> {
        Ok(self.config()?.source_paths.as_slice())
    }

    pub fn destination_paths(&self) -> Result<&[String]> {
        Ok(self.config()?.destination_paths.as_slice())
    }

    pub fn cleanup_paths(&self) -> Result<&[String]> {
        Ok(self.config()?.cleanup_paths.as_slice())
    }
}
