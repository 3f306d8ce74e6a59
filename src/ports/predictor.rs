//! Predictor port: Trait for the pre-trained classifiers.
//!
//! A predictor is opaque to the application. It takes a feature vector in
//! training order and returns a categorical scalar where `1` means positive.

/// Errors raised by a predictor implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictorError {
    #[error("expected {expected} features, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("non-finite input at feature {index}")]
    InvalidInput { index: usize },

    #[error("model produced malformed output: {0}")]
    MalformedOutput(String),
}

/// Trait for a loaded classifier.
pub trait Predictor: Send + Sync {
    /// Number of features the model was trained on.
    fn arity(&self) -> usize;

    /// Classify one feature vector.
    ///
    /// # Errors
    /// Returns `PredictorError` when the input does not fit the model or the
    /// model cannot be evaluated.
    fn predict(&self, features: &[f64]) -> Result<f64, PredictorError>;
}
