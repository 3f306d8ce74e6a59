//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the workflow and the user directory, the classifiers and the
//! display.

mod credentials;
mod display;
mod predictor;

pub use credentials::CredentialStore;
pub use display::{Backdrop, Content, DisplaySink, NoticeLevel};
pub use predictor::{Predictor, PredictorError};
