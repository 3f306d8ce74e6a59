//! Prediction dispatcher: runs a form submission through its predictor.
//!
//! Every way a predictor can fail (an error, a non-finite output, a panic)
//! collapses into [`PredictionFailed`]. The cause is logged, never shown.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::domain::{Disease, Label, PredictionRequest, PredictionResult};
use crate::ports::Predictor;

/// A submission produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("prediction failed")]
pub struct PredictionFailed;

/// Routes each request to the predictor of its disease.
pub struct PredictionDispatcher<P>
where
    P: Predictor,
{
    diabetes: Arc<P>,
    heart_disease: Arc<P>,
}

impl<P> Clone for PredictionDispatcher<P>
where
    P: Predictor,
{
    fn clone(&self) -> Self {
        Self {
            diabetes: Arc::clone(&self.diabetes),
            heart_disease: Arc::clone(&self.heart_disease),
        }
    }
}

impl<P> PredictionDispatcher<P>
where
    P: Predictor,
{
    /// Create a dispatcher over the loaded predictors.
    pub fn new(diabetes: Arc<P>, heart_disease: Arc<P>) -> Self {
        Self {
            diabetes,
            heart_disease,
        }
    }

    fn predictor_for(&self, disease: Disease) -> Option<&P> {
        match disease {
            Disease::Diabetes => Some(self.diabetes.as_ref()),
            Disease::HeartDisease => Some(self.heart_disease.as_ref()),
            Disease::Parkinsons => None,
        }
    }

    /// Classify one submission and build its result.
    ///
    /// The request is consumed; nothing about it is kept after this returns.
    ///
    /// # Errors
    /// Returns `PredictionFailed` if the predictor errors, panics, or returns
    /// a non-finite value.
    pub fn dispatch(&self, request: PredictionRequest) -> Result<PredictionResult, PredictionFailed> {
        let disease = request.disease();
        let predictor = self.predictor_for(disease).ok_or_else(|| {
            tracing::warn!(%disease, "No predictor registered");
            PredictionFailed
        })?;

        let features = request.feature_vector();
        tracing::debug!(%disease, n_features = features.len(), "Dispatching prediction");

        let label = invoke(predictor, &features)?;
        tracing::info!(%disease, %label, "Prediction complete");

        Ok(PredictionResult::new(&request, label))
    }
}

/// Single fallible boundary around a predictor call.
fn invoke<P: Predictor + ?Sized>(predictor: &P, features: &[f64]) -> Result<Label, PredictionFailed> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| predictor.predict(features)));

    match outcome {
        Ok(Ok(output)) if output.is_finite() => Ok(Label::from_output(output)),
        Ok(Ok(output)) => {
            tracing::warn!(output, "Predictor returned a non-finite value");
            Err(PredictionFailed)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Predictor failed");
            Err(PredictionFailed)
        }
        Err(_) => {
            tracing::error!("Predictor panicked");
            Err(PredictionFailed)
        }
    }
}
