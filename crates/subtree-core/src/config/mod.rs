//! Checkout configuration
//!
//! - [`CheckoutConfig`]: the canonical six-key schema and its defaults
//! - [`validate_document`]: accumulating validation of raw JSON
//! - [`store`]: loading, creating and holding configuration files

mod schema;
pub mod store;
mod validate;

pub use schema::{CheckoutConfig, REQUIRED_KEYS, keys};
pub use store::{ConfigStore, config_file_path, create_default, load, save};
pub use validate::{ValidationIssue, ValidationReport, validate_document};
