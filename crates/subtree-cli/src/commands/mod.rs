//! Command implementations

mod checkout;
mod completions;
mod config;

pub use checkout::run_checkout;
pub use completions::run_completions;
pub use config::{open_command, run_config};
