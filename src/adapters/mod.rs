//! Adapters layer: Concrete implementations of ports.
//!
//! - `memory`: volatile user directory
//! - `model`: JSON logistic-regression predictors
//! - `sanitize`: account-data redaction for logs

pub mod memory;
pub mod model;
pub mod sanitize;

pub use memory::InMemoryCredentialStore;
pub use model::{LogisticModel, ModelError, ModelSet};
