//! subtree CLI
//!
//! Checks out files and folders from a remote git repository into the
//! repository in the current directory.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => {
            // Completion scripts go to stdout untouched by log output.
            if !matches!(cmd, Commands::Completions { .. }) {
                logging::init(cli.verbose, cli.log_file.as_deref())?;
                if cli.verbose {
                    tracing::debug!("Verbose mode enabled");
                }
            }
            execute_command(cmd)
        }
        None => {
            println!(
                "{} Check out files and folders from a remote git repository",
                "subtree".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "subtree --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Checkout { file, strict, json } => {
            commands::run_checkout(&cwd, &file, strict, json)
        }
        Commands::Config { file, no_open } => commands::run_config(&cwd, &file, !no_open),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn core_errors_display_transparently() {
        let error: crate::error::CliError = subtree_core::Error::EmptyConfiguration.into();
        assert_eq!(error.to_string(), "No configuration has been loaded");
    }
}
