//! Config command implementation
//!
//! Creates a default configuration file when needed and opens it with the
//! platform's default application.

use std::path::Path;

use colored::Colorize;
use subtree_core::config;
use subtree_git::{CommandRunner, ProcessExecutor};

use crate::error::Result;

/// Run the config command for `file`, relative to `root`.
pub fn run_config(root: &Path, file: &Path, open: bool) -> Result<()> {
    let path = root.join(config::config_file_path(file));

    if config::create_default(&path)? {
        println!(
            "{} Created configuration file {}",
            "OK".green().bold(),
            path.display().to_string().cyan()
        );
    }

    if !open {
        return Ok(());
    }

    tracing::info!(path = %path.display(), "Opening configuration file for editing");
    let path_arg = path.to_string_lossy();
    let output = ProcessExecutor::new().run(&open_command(&path_arg), false)?;
    if !output.success() {
        // The file exists either way; a missing opener is not fatal.
        tracing::warn!(
            status = ?output.status,
            stderr = %output.stderr.trim(),
            "Could not open configuration file"
        );
        println!(
            "Edit {} with the editor of your choice.",
            path.display().to_string().cyan()
        );
    }
    Ok(())
}

/// Command line that opens `path` with the platform default application.
pub fn open_command(path: &str) -> Vec<&str> {
    if cfg!(windows) {
        // `start` takes the first quoted argument as a window title.
        vec!["cmd", "/C", "start", "", path]
    } else if cfg!(target_os = "macos") {
        vec!["open", path]
    } else {
        vec!["xdg-open", path]
    }
}
