//! Domain layer: Core types and pure rules.
//!
//! Nothing here touches the terminal, the filesystem or a model artifact.

mod credentials;
mod disease;
mod prediction;
mod session;

pub use credentials::{
    is_valid_email, normalize_email, passwords_match, validate_email, CredentialRecord,
    EmailError, ALLOWED_EMAIL_DOMAIN,
};
pub use disease::{
    DiabetesFeatures, Disease, FieldSpec, HeartDiseaseFeatures, InputError, ReferenceRow,
    DIABETES_FIELDS, HEART_DISEASE_FIELDS,
};
pub use prediction::{Label, PatientInfo, PredictionRequest, PredictionResult, POSITIVE_SENTINEL};
pub use session::{AuthState, MenuEntry, SessionState, View, LOGGED_IN_MENU, LOGGED_OUT_MENU};
