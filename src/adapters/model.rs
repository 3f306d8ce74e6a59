//! Model adapter: Implementation of Predictor backed by exported logistic
//! regression parameters.
//!
//! Each disease has one JSON artifact in the model directory:
//!
//! ```json
//! {
//!   "name": "diabetes",
//!   "feature_names": ["Pregnancies", "..."],
//!   "coefficients": [0.12, "..."],
//!   "intercept": -0.8,
//!   "scaler_mean": [3.8, "..."],
//!   "scaler_scale": [3.4, "..."],
//!   "threshold": 0.5
//! }
//! ```
//!
//! `scaler_mean`/`scaler_scale` are optional (identity scaling when absent).
//! The model outputs `1.0` when the logistic probability reaches `threshold`,
//! otherwise `0.0`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::Disease;
use crate::ports::{Predictor, PredictorError};

fn default_threshold() -> f64 {
    0.5
}

/// Errors raised while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model file {path:?} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model file {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Logistic regression parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticModel {
    /// Read and check one artifact.
    ///
    /// # Errors
    /// Returns `ModelError` if the file is missing, is not valid JSON, or has
    /// inconsistent parameter lengths.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&content).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.check()?;

        tracing::info!(
            "Loaded model {} from {:?} (n_features={}, threshold={})",
            model.name,
            path,
            model.arity(),
            model.threshold
        );
        Ok(model)
    }

    fn invalid(&self, reason: impl Into<String>) -> ModelError {
        ModelError::Invalid {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }

    /// Sanity checks on parameter shapes and values.
    fn check(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();
        if n == 0 {
            return Err(self.invalid("no features"));
        }
        if self.coefficients.len() != n {
            return Err(self.invalid(format!(
                "{} coefficients for {n} features",
                self.coefficients.len()
            )));
        }
        if let Some(mean) = &self.scaler_mean {
            if mean.len() != n {
                return Err(self.invalid("scaler_mean length does not match feature_names"));
            }
        }
        if let Some(scale) = &self.scaler_scale {
            if scale.len() != n {
                return Err(self.invalid("scaler_scale length does not match feature_names"));
            }
            if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(self.invalid("scaler_scale must be finite and non-zero"));
            }
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(self.invalid(format!("threshold {} outside [0, 1]", self.threshold)));
        }
        let all_finite = self
            .coefficients
            .iter()
            .chain(std::iter::once(&self.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(self.invalid("non-finite coefficient"));
        }
        Ok(())
    }

    fn standardize(&self, index: usize, value: f64) -> f64 {
        let mean = self.scaler_mean.as_ref().map_or(0.0, |m| m[index]);
        let scale = self.scaler_scale.as_ref().map_or(1.0, |s| s[index]);
        (value - mean) / scale
    }

    /// Probability of the positive class.
    ///
    /// # Errors
    /// Returns `PredictorError` on wrong arity or non-finite input.
    pub fn probability(&self, features: &[f64]) -> Result<f64, PredictorError> {
        if features.len() != self.arity() {
            return Err(PredictorError::Arity {
                expected: self.arity(),
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictorError::InvalidInput { index });
        }

        let z = features
            .iter()
            .zip(&self.coefficients)
            .enumerate()
            .fold(self.intercept, |acc, (i, (x, w))| {
                acc + w * self.standardize(i, *x)
            });

        Ok(sigmoid(z))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Predictor for LogisticModel {
    fn arity(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictorError> {
        let p = self.probability(features)?;
        if !p.is_finite() {
            return Err(PredictorError::MalformedOutput(format!("probability {p}")));
        }
        tracing::debug!(model = %self.name, "evaluated logistic model");
        Ok(if p >= self.threshold { 1.0 } else { 0.0 })
    }
}

/// The classifiers loaded at startup, one per disease with a form.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub diabetes: Arc<LogisticModel>,
    pub heart_disease: Arc<LogisticModel>,
}

impl ModelSet {
    /// Load every model from `model_dir`. Any failure is fatal to startup.
    ///
    /// # Errors
    /// Returns `ModelError` if an artifact is missing or malformed, or does not
    /// take the number of features its form collects.
    pub fn load(model_dir: &Path) -> Result<Self, ModelError> {
        Ok(Self {
            diabetes: Arc::new(load_for(model_dir, Disease::Diabetes)?),
            heart_disease: Arc::new(load_for(model_dir, Disease::HeartDisease)?),
        })
    }
}

fn load_for(model_dir: &Path, disease: Disease) -> Result<LogisticModel, ModelError> {
    let model = LogisticModel::from_file(&model_dir.join(disease.model_file()))?;
    match disease.arity() {
        Some(expected) if expected == model.arity() => Ok(model),
        Some(expected) => Err(model.invalid(format!(
            "{disease} form collects {expected} features, model takes {}",
            model.arity()
        ))),
        None => Err(model.invalid(format!("no {disease} form to feed this model"))),
    }
}
