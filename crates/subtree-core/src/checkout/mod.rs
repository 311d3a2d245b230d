//! Checkout orchestration
//!
//! [`CheckoutEngine`] sequences remote setup, selective checkout, relocation
//! and cleanup for one [`CheckoutConfig`](crate::CheckoutConfig), and
//! returns a [`CheckoutReport`] describing every step.

mod engine;
mod report;

pub use engine::CheckoutEngine;
pub use report::{CheckoutReport, CommandRecord, PathOutcome, PathStep, RelocationStep};
