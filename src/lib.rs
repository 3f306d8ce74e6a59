//! # medpredict
//!
//! Predictive disease detection behind a session-scoped sign-in.
//!
//! This crate provides:
//! - Email/password sign-up and login against a volatile user directory
//! - A view router that keeps prediction forms behind authentication
//! - Diabetes and heart disease classifiers loaded from JSON artifacts
//! - Terminal UI acting as the form front end and result display
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (Session, Credentials, Disease features)
//! - `ports`: Trait definitions for the user directory, predictors and display
//! - `adapters`: Concrete implementations (in-memory store, logistic models)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Label, MenuEntry, PredictionResult, SessionState, View};

/// Result type for medpredict operations
pub type Result<T> = std::result::Result<T, MedPredictError>;

/// Main error type for medpredict
#[derive(Debug, thiserror::Error)]
pub enum MedPredictError {
    #[error("Model load failed: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}
