//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// subtree - Check out files and folders from a remote git repository
#[derive(Parser, Debug)]
#[command(name = "subtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write log lines to this file
    #[arg(long, global = true, value_name = "PATH", env = "SUBTREE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Perform a checkout using the given configuration file
    ///
    /// Run from the root of the repository that receives the files.
    ///
    /// Examples:
    ///   subtree checkout vendor.json
    ///   subtree checkout vendor.json --strict --json
    Checkout {
        /// Configuration file to use for the checkout
        file: PathBuf,

        /// Exit with an error if any step failed
        #[arg(long)]
        strict: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or edit a checkout configuration file
    ///
    /// `.json` is appended to FILE when missing. A file with default values
    /// is created if none exists, then opened with the default application.
    Config {
        /// The configuration file to edit
        file: PathBuf,

        /// Create the file but do not open it
        #[arg(long)]
        no_open: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_checkout() {
        let cli = Cli::try_parse_from(["subtree", "checkout", "vendor.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Checkout {
                file: PathBuf::from("vendor.json"),
                strict: false,
                json: false,
            })
        );
    }

    #[test]
    fn parse_checkout_flags() {
        let cli =
            Cli::try_parse_from(["subtree", "checkout", "vendor.json", "--strict", "--json"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Checkout {
                strict: true,
                json: true,
                ..
            })
        ));
    }

    #[test]
    fn checkout_requires_file() {
        assert!(Cli::try_parse_from(["subtree", "checkout"]).is_err());
    }

    #[test]
    fn parse_config_no_open() {
        let cli = Cli::try_parse_from(["subtree", "config", "vendor", "--no-open"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                file: PathBuf::from("vendor"),
                no_open: true,
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "subtree",
            "checkout",
            "vendor.json",
            "-v",
            "--log-file",
            "logs/subtree.log",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("logs/subtree.log")));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::try_parse_from(["subtree", "completions", "bash"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        );
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["subtree"]).unwrap();
        assert!(cli.command.is_none());
    }
}
