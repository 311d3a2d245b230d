//! Checkout command implementation

use std::path::Path;

use colored::Colorize;
use subtree_core::checkout::{CheckoutEngine, CheckoutReport, PathOutcome};
use subtree_git::ProcessExecutor;

use crate::error::{CliError, Result};

/// Run the checkout described by `file` against the repository at `root`.
///
/// Without `strict` a run with failed steps still succeeds; the summary
/// lists what failed.
pub fn run_checkout(root: &Path, file: &Path, strict: bool, json: bool) -> Result<()> {
    let engine = CheckoutEngine::new(root, ProcessExecutor::in_dir(root));
    let report = engine.run_from_file(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if strict && report.has_failures() {
        return Err(CliError::user(format!(
            "Checkout of '{}' finished with {} failed step(s)",
            file.display(),
            failure_count(&report)
        )));
    }
    Ok(())
}

fn failure_count(report: &CheckoutReport) -> usize {
    let commands = report.commands.iter().filter(|c| !c.success()).count();
    // Failed checkouts are already counted as failed commands.
    commands + report.failed_steps() - report.failed_checkouts().len()
}

fn print_summary(report: &CheckoutReport) {
    let config = &report.config;
    println!(
        "{} Checked out from {} ({})",
        "=>".blue().bold(),
        format!("{}/{}", config.remote_name, config.branch).cyan(),
        report.commit.as_deref().unwrap_or("unknown commit").dimmed()
    );

    for step in &report.checkouts {
        print_line(&step.path, &step.outcome);
    }
    for step in &report.relocations {
        print_line(
            &format!("{} -> {}", step.source, step.destination),
            &step.outcome,
        );
    }
    for step in &report.cleanups {
        print_line(&format!("delete {}", step.path), &step.outcome);
    }

    if !report.remote_removed {
        println!(
            "{} Remote '{}' could not be removed",
            "!!".red().bold(),
            config.remote_name
        );
    }

    if report.has_failures() {
        println!("{} Checkout finished with failures", "!!".yellow().bold());
    } else {
        println!("{} Checkout complete", "OK".green().bold());
    }
}

fn print_line(label: &str, outcome: &PathOutcome) {
    match outcome {
        PathOutcome::Done => println!("   {} {}", "ok".green(), label),
        PathOutcome::Skipped { reason } => {
            println!("   {} {} ({})", "skipped".yellow(), label, reason)
        }
        PathOutcome::Failed { reason } => {
            println!("   {} {}: {}", "failed".red(), label, reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();

        let result = run_checkout(temp.path(), &temp.path().join("absent.json"), false, false);

        assert!(matches!(
            result,
            Err(CliError::Core(subtree_core::Error::NotFound { .. }))
        ));
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("vendor.json");
        fs::write(&file, "{}").unwrap();

        let result = run_checkout(temp.path(), &file, false, false);

        assert!(matches!(
            result,
            Err(CliError::Core(subtree_core::Error::InvalidConfiguration { .. }))
        ));
    }
}
