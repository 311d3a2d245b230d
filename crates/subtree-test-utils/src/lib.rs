//! Shared test utilities for the subtree workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: real git repositories built with the `git` CLI, inspected with `git2`
//! - [`logs`]: capturing `tracing` events with their levels
//! - [`repo`]: [`TestRepo`](repo::TestRepo), a temporary working tree with assertion helpers

pub mod git;
pub mod logs;
pub mod repo;
