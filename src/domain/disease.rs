//! Disease kinds and the clinical features each predictor expects.
//!
//! Feature order is part of each predictor's contract: `to_vec` must yield
//! the exact order the model was trained on.

use serde::{Deserialize, Serialize};

/// Diseases with a prediction view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Disease {
    /// Number of features the predictor takes, if a predictor exists.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        match self {
            Self::Diabetes => Some(DIABETES_FIELDS.len()),
            Self::HeartDisease => Some(HEART_DISEASE_FIELDS.len()),
            Self::Parkinsons => None,
        }
    }

    /// Ordered input fields for the prediction form.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Diabetes => &DIABETES_FIELDS,
            Self::HeartDisease => &HEART_DISEASE_FIELDS,
            Self::Parkinsons => &[],
        }
    }

    /// Artifact file name in the model directory.
    #[must_use]
    pub fn model_file(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model.json",
            Self::HeartDisease => "heart_disease_model.json",
            Self::Parkinsons => "parkinsons_model.json",
        }
    }

    /// Label of the submit button.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Test Result",
            Self::HeartDisease => "Heart Disease Test Result",
            Self::Parkinsons => "Parkinson's Test Result",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Diabetes => write!(f, "diabetes"),
            Self::HeartDisease => write!(f, "heart disease"),
            Self::Parkinsons => write!(f, "parkinson's"),
        }
    }
}

/// One numeric input of a prediction form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub hint: &'static str,
    /// Values below this are rejected. `None` means unbounded.
    pub min: Option<f64>,
}

const fn field(label: &'static str, hint: &'static str, min: Option<f64>) -> FieldSpec {
    FieldSpec { label, hint, min }
}

/// Diabetes form fields, in training order.
pub const DIABETES_FIELDS: [FieldSpec; 8] = [
    field("Number of Pregnancies", "count", Some(0.0)),
    field("Glucose Level", "mg/dL", Some(0.0)),
    field("Blood Pressure value", "mmHg", Some(0.0)),
    field("Skin Thickness value", "mm", Some(0.0)),
    field("Insulin Level", "mIU/L", Some(0.0)),
    field("BMI value", "kg/m^2", Some(0.0)),
    field("Diabetes Pedigree Function value", "score", Some(0.0)),
    field("Age of the Person", "years", Some(0.0)),
];

/// Heart disease form fields, in training order. No minimums are declared.
pub const HEART_DISEASE_FIELDS: [FieldSpec; 13] = [
    field("Age", "years", None),
    field("Sex", "1=male, 0=female", None),
    field("Chest Pain types", "0-3", None),
    field("Resting Blood Pressure", "mmHg", None),
    field("Serum Cholestoral in mg/dl", "mg/dL", None),
    field("Fasting Blood Sugar > 120 mg/dl", "1=true, 0=false", None),
    field("Resting Electrocardiographic results", "0-2", None),
    field("Maximum Heart Rate achieved", "bpm", None),
    field("Exercise Induced Angina", "1=yes, 0=no", None),
    field("Depression induced by exercise relative to rest", "ST depression", None),
    field("Slope of the peak exercise ST segment", "0-2", None),
    field("Number of major vessels colored by fluoroscopy", "0-3", None),
    field("thalassemia", "0-3", None),
];

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("expected {expected} values, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("{field}: invalid number")]
    NotANumber { field: &'static str },

    #[error("{field}: value must be at least {min}")]
    BelowMinimum { field: &'static str, min: f64 },
}

/// Check arity, finiteness and declared minimums.
fn check_values(fields: &[FieldSpec], values: &[f64]) -> Result<(), InputError> {
    if values.len() != fields.len() {
        return Err(InputError::Arity {
            expected: fields.len(),
            got: values.len(),
        });
    }

    for (spec, value) in fields.iter().zip(values) {
        if !value.is_finite() {
            return Err(InputError::NotANumber { field: spec.label });
        }
        if let Some(min) = spec.min {
            if *value < min {
                return Err(InputError::BelowMinimum {
                    field: spec.label,
                    min,
                });
            }
        }
    }

    Ok(())
}

/// Pima-style diabetes features.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiabetesFeatures {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

impl DiabetesFeatures {
    /// Convert features to the predictor's input vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age,
        ]
    }

    /// Build from form values given in [`DIABETES_FIELDS`] order.
    ///
    /// # Errors
    /// Returns `InputError` on wrong arity, non-finite or negative values.
    pub fn from_values(v: &[f64]) -> Result<Self, InputError> {
        check_values(&DIABETES_FIELDS, v)?;
        Ok(Self {
            pregnancies: v[0],
            glucose: v[1],
            blood_pressure: v[2],
            skin_thickness: v[3],
            insulin: v[4],
            bmi: v[5],
            diabetes_pedigree_function: v[6],
            age: v[7],
        })
    }

    /// Reference table shown with a diabetes result. Age is not part of it.
    #[must_use]
    pub fn reference_table(&self) -> Vec<ReferenceRow> {
        let values = [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
        ];

        DIABETES_REFERENCE
            .iter()
            .zip(values)
            .map(|(&(parameter, normal_range, unit), patient_value)| ReferenceRow {
                parameter,
                patient_value,
                normal_range,
                unit,
            })
            .collect()
    }
}

/// (parameter, normal range, unit) for the diabetes report.
const DIABETES_REFERENCE: [(&str, &str, &str); 7] = [
    ("Pregnancies", "0-10", "Number"),
    ("Glucose", "70-125", "mg/dL"),
    ("Blood Pressure", "120/80", "mmHg"),
    ("Skin Thickness", "8-25", "mm"),
    ("Insulin", "25-250", "mIU/L"),
    ("BMI", "18.5-24.9", "kg/m^2"),
    ("Diabetes Pedigree Function", "< 1", "No units"),
];

/// Cleveland-style heart disease features.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeartDiseaseFeatures {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,
}

impl HeartDiseaseFeatures {
    /// Convert features to the predictor's input vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
        ]
    }

    /// Build from form values given in [`HEART_DISEASE_FIELDS`] order.
    ///
    /// # Errors
    /// Returns `InputError` on wrong arity or non-finite values.
    pub fn from_values(v: &[f64]) -> Result<Self, InputError> {
        check_values(&HEART_DISEASE_FIELDS, v)?;
        Ok(Self {
            age: v[0],
            sex: v[1],
            cp: v[2],
            trestbps: v[3],
            chol: v[4],
            fbs: v[5],
            restecg: v[6],
            thalach: v[7],
            exang: v[8],
            oldpeak: v[9],
            slope: v[10],
            ca: v[11],
            thal: v[12],
        })
    }
}

/// One row of the diabetes reference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub parameter: &'static str,
    pub patient_value: f64,
    pub normal_range: &'static str,
    pub unit: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_diabetes() -> DiabetesFeatures {
        DiabetesFeatures::from_values(&[2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 35.0])
            .expect("valid features")
    }

    #[test]
    fn test_diabetes_vec_keeps_training_order() {
        let features = sample_diabetes();
        assert_eq!(
            features.to_vec(),
            vec![2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 35.0]
        );
        assert!((features.bmi - 28.5).abs() < f64::EPSILON);
        assert!((features.age - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_diabetes_rejects_negative_values() {
        let err = DiabetesFeatures::from_values(&[2.0, -1.0, 70.0, 20.0, 80.0, 28.5, 0.5, 35.0])
            .unwrap_err();
        assert_eq!(
            err,
            InputError::BelowMinimum {
                field: "Glucose Level",
                min: 0.0
            }
        );
    }

    #[test]
    fn test_arity_is_checked() {
        let err = DiabetesFeatures::from_values(&[1.0; 7]).unwrap_err();
        assert_eq!(err, InputError::Arity { expected: 8, got: 7 });

        let err = HeartDiseaseFeatures::from_values(&[1.0; 14]).unwrap_err();
        assert_eq!(err, InputError::Arity { expected: 13, got: 14 });
    }

    #[test]
    fn test_heart_disease_has_no_minimum() {
        let mut values = [0.0; 13];
        values[9] = -2.6;
        let features = HeartDiseaseFeatures::from_values(&values).expect("no minimum");
        assert!((features.oldpeak + 2.6).abs() < f64::EPSILON);
        assert_eq!(features.to_vec().len(), 13);
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut values = [0.0; 13];
        values[0] = f64::NAN;
        assert_eq!(
            HeartDiseaseFeatures::from_values(&values).unwrap_err(),
            InputError::NotANumber { field: "Age" }
        );
    }

    #[test]
    fn test_reference_table_excludes_age() {
        let table = sample_diabetes().reference_table();
        assert_eq!(table.len(), 7);
        assert_eq!(table[0].parameter, "Pregnancies");
        assert_eq!(table[1].normal_range, "70-125");
        assert!((table[1].patient_value - 130.0).abs() < f64::EPSILON);
        assert_eq!(table[6].unit, "No units");
        assert!(table.iter().all(|row| row.parameter != "Age"));
    }

    #[test]
    fn test_arity_per_disease() {
        assert_eq!(Disease::Diabetes.arity(), Some(8));
        assert_eq!(Disease::HeartDisease.arity(), Some(13));
        assert_eq!(Disease::Parkinsons.arity(), None);
        assert!(Disease::Parkinsons.fields().is_empty());
    }
}
