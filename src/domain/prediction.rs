//! Prediction requests and results.

use serde::Serialize;

use super::disease::{DiabetesFeatures, Disease, HeartDiseaseFeatures, ReferenceRow};

/// Output value a predictor uses to signal a positive case.
pub const POSITIVE_SENTINEL: f64 = 1.0;

/// Binary outcome shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Positive iff the categorical output equals the sentinel `1`.
    #[must_use]
    pub fn from_output(output: f64) -> Self {
        if output == POSITIVE_SENTINEL {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// A single form submission, built by the view and passed by value.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionRequest {
    Diabetes {
        patient_name: String,
        features: DiabetesFeatures,
    },
    HeartDisease {
        features: HeartDiseaseFeatures,
    },
}

impl PredictionRequest {
    #[must_use]
    pub fn disease(&self) -> Disease {
        match self {
            Self::Diabetes { .. } => Disease::Diabetes,
            Self::HeartDisease { .. } => Disease::HeartDisease,
        }
    }

    /// Feature vector in training order.
    #[must_use]
    pub fn feature_vector(&self) -> Vec<f64> {
        match self {
            Self::Diabetes { features, .. } => features.to_vec(),
            Self::HeartDisease { features } => features.to_vec(),
        }
    }
}

/// Patient details echoed back with the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientInfo {
    /// Only collected by the diabetes form.
    pub name: Option<String>,
    pub age: f64,
}

/// Everything the display needs to render one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub disease: Disease,
    pub label: Label,
    pub patient: PatientInfo,

    /// (field label, value) pairs in training order
    pub inputs: Vec<(&'static str, f64)>,

    /// Reference ranges. Diabetes only.
    pub reference: Option<Vec<ReferenceRow>>,

    /// Whether to remind the user to check their email. Diabetes only.
    pub email_reminder: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    /// Assemble the result for a request and the label its predictor produced.
    #[must_use]
    pub fn new(request: &PredictionRequest, label: Label) -> Self {
        let disease = request.disease();
        let inputs = disease
            .fields()
            .iter()
            .map(|spec| spec.label)
            .zip(request.feature_vector())
            .collect();

        let (patient, reference, email_reminder) = match request {
            PredictionRequest::Diabetes {
                patient_name,
                features,
            } => (
                PatientInfo {
                    name: Some(patient_name.clone()),
                    age: features.age,
                },
                Some(features.reference_table()),
                true,
            ),
            PredictionRequest::HeartDisease { features } => (
                PatientInfo {
                    name: None,
                    age: features.age,
                },
                None,
                false,
            ),
        };

        Self {
            disease,
            label,
            patient,
            inputs,
            reference,
            email_reminder,
            created_at: chrono::Utc::now(),
        }
    }
}
