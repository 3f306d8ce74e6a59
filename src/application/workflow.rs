//! Session workflow: the view layer between the front end and the services.
//!
//! One `Workflow` exists per session. Each interaction cycle the front end
//! calls exactly one operation and passes the sink that should receive the
//! content for that cycle:
//!
//! - `select`: a menu entry was chosen
//! - `submit_signup` / `submit_login`: an auth form was submitted
//! - `submit_prediction`: a prediction form was submitted
//!
//! A failed submission leaves the session untouched and emits exactly one
//! error notice.

use crate::domain::{
    normalize_email, passwords_match, validate_email, Disease, EmailError, InputError, Label,
    MenuEntry, PredictionRequest, PredictionResult, SessionState, View,
};
use crate::ports::{Backdrop, Content, CredentialStore, DisplaySink, NoticeLevel, Predictor};

use super::auth::AuthService;
use super::prediction::PredictionDispatcher;
use super::router::{route, Route};

const HOME_INTRO: &str = "This application uses machine learning to predict the likelihood of the following diseases:";
const HOME_DISEASES: [&str; 3] = ["Diabetes", "Heart Disease", "Parkinson's Disease"];
const HOME_OUTRO: &str = "Select a disease prediction option from the sidebar to get started.";
const PARKINSONS_PLACEHOLDER: &str = "Parkinson's prediction is not available yet.";
const EMAIL_REMINDER: &str = "Do check your email for more details, Thank You.";

/// Sign-up form contents.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login form contents.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Every way a form submission can be refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("invalid email format")]
    InvalidEmailFormat,

    #[error("email domain not allowed")]
    EmailDomainNotAllowed,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("prediction failed")]
    PredictionFailed,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("view not available in the current session state")]
    ViewUnavailable,
}

impl From<EmailError> for FormError {
    fn from(e: EmailError) -> Self {
        match e {
            EmailError::Format => Self::InvalidEmailFormat,
            EmailError::DomainNotAllowed => Self::EmailDomainNotAllowed,
        }
    }
}

impl FormError {
    /// Message shown to the user. Both email errors share one message and
    /// prediction failures never reveal their cause.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmailFormat | Self::EmailDomainNotAllowed => {
                "Please enter a valid Gmail address (e.g., example@gmail.com).".into()
            }
            Self::PasswordMismatch => "Passwords do not match. Please try again.".into(),
            Self::EmailAlreadyRegistered => "This email is already registered. Please login.".into(),
            Self::InvalidCredentials => "Invalid email or password. Please try again.".into(),
            Self::PredictionFailed => {
                "Error during prediction. Check your model or input data.".into()
            }
            Self::InvalidInput(e) => e.to_string(),
            Self::ViewUnavailable => "Page not recognized.".into(),
        }
    }
}

/// Per-session controller.
pub struct Workflow<S, P>
where
    S: CredentialStore,
    P: Predictor,
{
    session: SessionState,
    auth: AuthService<S>,
    dispatcher: PredictionDispatcher<P>,
}

impl<S, P> Workflow<S, P>
where
    S: CredentialStore,
    P: Predictor,
{
    /// Start a signed-out session.
    pub fn new(auth: AuthService<S>, dispatcher: PredictionDispatcher<P>) -> Self {
        Self {
            session: SessionState::new(),
            auth,
            dispatcher,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Menu entries to offer for the next selection.
    #[must_use]
    pub fn offered_menu(&self) -> &'static [MenuEntry] {
        self.session.offered_menu()
    }

    /// Handle a menu selection and render the chosen view's static body.
    pub fn select(&mut self, entry: MenuEntry, sink: &mut dyn DisplaySink) -> Route {
        let routed = route(&mut self.session, entry);
        match routed {
            Route::Render(view) => self.render_view(view, sink),
            Route::LoggedOut => {
                sink.set_backdrop(Backdrop::Plain);
                sink.emit(Content::notice(
                    NoticeLevel::Success,
                    "You have been logged out.",
                ));
            }
            Route::NotRecognized(_) => {
                sink.set_backdrop(Backdrop::Plain);
                sink.emit(Content::notice(
                    NoticeLevel::Warning,
                    FormError::ViewUnavailable.user_message(),
                ));
            }
        }
        routed
    }

    /// Emit the static body of `view`: backdrop, title and fixed text.
    pub fn render_view(&self, view: View, sink: &mut dyn DisplaySink) {
        sink.set_backdrop(Backdrop::for_view(view));
        sink.emit(Content::Title(view.title().into()));

        match view {
            View::Home => {
                if let Some(name) = &self.session.display_name {
                    sink.emit(Content::Text(format!("Signed in as {name}.")));
                }
                sink.emit(Content::Text(HOME_INTRO.into()));
                sink.emit(Content::List(
                    HOME_DISEASES.iter().map(|d| (*d).to_string()).collect(),
                ));
                sink.emit(Content::Text(HOME_OUTRO.into()));
            }
            View::Parkinsons => {
                sink.emit(Content::notice(NoticeLevel::Info, PARKINSONS_PLACEHOLDER));
            }
            View::Login | View::Signup | View::Diabetes | View::HeartDisease => {}
        }
    }

    /// Validate and submit the sign-up form. Signs the session in on success.
    ///
    /// # Errors
    /// Returns the `FormError` that was shown to the user.
    pub fn submit_signup(
        &mut self,
        form: SignupForm,
        sink: &mut dyn DisplaySink,
    ) -> Result<(), FormError> {
        let outcome = self.try_signup(&form);
        let success = format!("Account created successfully for {}!", form.name);
        report(outcome, sink, success)
    }

    fn try_signup(&mut self, form: &SignupForm) -> Result<(), FormError> {
        self.require_view(View::Signup, false)?;
        validate_email(&form.email)?;
        if !passwords_match(&form.password, &form.confirm_password) {
            return Err(FormError::PasswordMismatch);
        }
        self.auth
            .signup(&form.name, &form.email, &form.password)
            .map_err(|_| FormError::EmailAlreadyRegistered)?;

        self.session
            .establish(normalize_email(&form.email), form.name.clone());
        tracing::info!("Session signed in after sign-up");
        Ok(())
    }

    /// Validate and submit the login form. Signs the session in on success.
    ///
    /// # Errors
    /// Returns the `FormError` that was shown to the user.
    pub fn submit_login(
        &mut self,
        form: LoginForm,
        sink: &mut dyn DisplaySink,
    ) -> Result<(), FormError> {
        let outcome = self.try_login(&form);
        report(outcome, sink, "Login successful!".to_string())
    }

    fn try_login(&mut self, form: &LoginForm) -> Result<(), FormError> {
        self.require_view(View::Login, false)?;
        validate_email(&form.email)?;
        let display_name = self
            .auth
            .login(&form.email, &form.password)
            .map_err(|_| FormError::InvalidCredentials)?;

        self.session
            .establish(normalize_email(&form.email), display_name);
        tracing::info!("Session signed in");
        Ok(())
    }

    /// Run a prediction form through its predictor and render the report.
    ///
    /// # Errors
    /// Returns `FormError::ViewUnavailable` unless the session is signed in
    /// with the request's view active, and `FormError::PredictionFailed` when
    /// the predictor fails.
    pub fn submit_prediction(
        &mut self,
        request: PredictionRequest,
        sink: &mut dyn DisplaySink,
    ) -> Result<PredictionResult, FormError> {
        let view = match request.disease() {
            Disease::Diabetes => View::Diabetes,
            Disease::HeartDisease => View::HeartDisease,
            Disease::Parkinsons => View::Parkinsons,
        };

        let outcome = self.require_view(view, true).and_then(|()| {
            self.dispatcher
                .dispatch(request)
                .map_err(|_| FormError::PredictionFailed)
        });

        match outcome {
            Ok(result) => {
                render_result(&result, sink);
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction submission refused");
                sink.emit(Content::notice(NoticeLevel::Error, e.user_message()));
                Err(e)
            }
        }
    }

    /// A form may only be submitted from the view that shows it.
    fn require_view(&self, view: View, logged_in: bool) -> Result<(), FormError> {
        let allowed = if logged_in {
            self.session.logged_in && self.session.active_view == view
        } else {
            !self.session.logged_in
        };
        if allowed {
            Ok(())
        } else {
            Err(FormError::ViewUnavailable)
        }
    }
}

/// Emit the outcome notice of an auth form.
fn report(
    outcome: Result<(), FormError>,
    sink: &mut dyn DisplaySink,
    success: String,
) -> Result<(), FormError> {
    match outcome {
        Ok(()) => {
            sink.emit(Content::notice(NoticeLevel::Success, success));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Form submission refused");
            sink.emit(Content::notice(NoticeLevel::Error, e.user_message()));
            Err(e)
        }
    }
}

/// Emit the report for a successful prediction.
fn render_result(result: &PredictionResult, sink: &mut dyn DisplaySink) {
    sink.emit(Content::Heading(format!("Test Result: {}", result.label)));

    let mut info = Vec::with_capacity(2);
    if let Some(name) = &result.patient.name {
        info.push(("Patient Name".to_string(), name.clone()));
    }
    info.push(("Age".to_string(), format_value(result.patient.age)));
    sink.emit(Content::InfoBlock(info));

    if let Some(reference) = &result.reference {
        sink.emit(Content::Table {
            headers: ["Parameter Name", "Patient Values", "Normal Range", "Unit"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows: reference
                .iter()
                .map(|row| {
                    vec![
                        row.parameter.to_string(),
                        format_value(row.patient_value),
                        row.normal_range.to_string(),
                        row.unit.to_string(),
                    ]
                })
                .collect(),
        });
    }

    if result.email_reminder {
        sink.emit(Content::notice(NoticeLevel::Info, EMAIL_REMINDER));
    }

    let level = match result.label {
        Label::Positive => "positive",
        Label::Negative => "negative",
    };
    tracing::debug!(disease = %result.disease, result = level, "Rendered report");
}

/// Integers without a fractional part, everything else with two decimals.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCredentialStore;
    use crate::application::prediction::tests::{Stub, StubPredictor};
    use crate::domain::DiabetesFeatures;
    use std::sync::Arc;

    /// Sink that records everything it is handed.
    #[derive(Default)]
    struct RecordingSink {
        backdrop: Backdrop,
        content: Vec<Content>,
    }

    impl DisplaySink for RecordingSink {
        fn set_backdrop(&mut self, backdrop: Backdrop) {
            self.backdrop = backdrop;
        }

        fn emit(&mut self, content: Content) {
            self.content.push(content);
        }
    }

    impl RecordingSink {
        fn notices(&self) -> Vec<(NoticeLevel, String)> {
            self.content
                .iter()
                .filter_map(|c| match c {
                    Content::Notice { level, message } => Some((*level, message.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    struct Harness {
        workflow: Workflow<InMemoryCredentialStore, StubPredictor>,
        store: Arc<InMemoryCredentialStore>,
    }

    fn harness(diabetes: Stub) -> Harness {
        let store = Arc::new(InMemoryCredentialStore::new());
        let dispatcher = PredictionDispatcher::new(
            StubPredictor::new(diabetes, 8),
            StubPredictor::new(Stub::Output(0.0), 13),
        );
        Harness {
            workflow: Workflow::new(AuthService::new(Arc::clone(&store)), dispatcher),
            store,
        }
    }

    fn signup_form(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn signed_in(diabetes: Stub) -> Harness {
        let mut h = harness(diabetes);
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Signup, &mut sink);
        h.workflow
            .submit_signup(signup_form("Alice", "alice@gmail.com", "pw1", "pw1"), &mut sink)
            .expect("signup");
        h
    }

    fn diabetes_request() -> PredictionRequest {
        PredictionRequest::Diabetes {
            patient_name: "Jane".into(),
            features: DiabetesFeatures::from_values(&[2.0, 130.0, 70.0, 20.0, 80.0, 28.5, 0.5, 35.0])
                .expect("valid"),
        }
    }

    #[test]
    fn test_signup_signs_in() {
        let mut h = harness(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        h.workflow
            .submit_signup(signup_form("Alice", "alice@gmail.com", "pw1", "pw1"), &mut sink)
            .expect("signup");

        let session = h.workflow.session();
        assert!(session.logged_in);
        assert_eq!(session.display_name.as_deref(), Some("Alice"));
        assert_eq!(session.user_email.as_deref(), Some("alice@gmail.com"));
        assert_eq!(session.active_view, View::Home);
        assert_eq!(
            sink.notices(),
            vec![(
                NoticeLevel::Success,
                "Account created successfully for Alice!".to_string()
            )]
        );
        assert_eq!(h.workflow.offered_menu(), &crate::domain::LOGGED_IN_MENU);
    }

    #[test]
    fn test_signup_password_mismatch_creates_nothing() {
        let mut h = harness(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        let err = h
            .workflow
            .submit_signup(signup_form("Alice", "alice@gmail.com", "pw1", "pw2"), &mut sink)
            .unwrap_err();

        assert_eq!(err, FormError::PasswordMismatch);
        assert!(h.store.is_empty());
        assert_eq!(h.workflow.session(), &SessionState::new());
        assert_eq!(
            sink.notices(),
            vec![(
                NoticeLevel::Error,
                "Passwords do not match. Please try again.".to_string()
            )]
        );
    }

    #[test]
    fn test_email_errors_share_one_message() {
        let mut h = harness(Stub::Output(0.0));
        let mut sink = RecordingSink::default();

        let format = h
            .workflow
            .submit_signup(signup_form("A", "not-an-email", "pw", "pw"), &mut sink)
            .unwrap_err();
        let domain = h
            .workflow
            .submit_login(
                LoginForm {
                    email: "alice@yahoo.com".into(),
                    password: "pw".into(),
                },
                &mut sink,
            )
            .unwrap_err();

        assert_eq!(format, FormError::InvalidEmailFormat);
        assert_eq!(domain, FormError::EmailDomainNotAllowed);
        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], notices[1]);
        assert!(h.store.is_empty());
    }

    #[test]
    fn test_duplicate_signup_reports_registered() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Logout, &mut sink);

        let err = h
            .workflow
            .submit_signup(signup_form("Eve", "ALICE@gmail.com", "x", "x"), &mut sink)
            .unwrap_err();
        assert_eq!(err, FormError::EmailAlreadyRegistered);
        assert!(!h.workflow.session().logged_in);
    }

    #[test]
    fn test_login_after_logout() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        assert_eq!(h.workflow.select(MenuEntry::Logout, &mut sink), Route::LoggedOut);
        assert_eq!(h.workflow.session(), &SessionState::new());

        let wrong = h
            .workflow
            .submit_login(
                LoginForm {
                    email: "alice@gmail.com".into(),
                    password: "nope".into(),
                },
                &mut sink,
            )
            .unwrap_err();
        assert_eq!(wrong, FormError::InvalidCredentials);
        assert!(!h.workflow.session().logged_in);

        h.workflow
            .submit_login(
                LoginForm {
                    email: " Alice@Gmail.com ".into(),
                    password: "pw1".into(),
                },
                &mut sink,
            )
            .expect("login");
        let session = h.workflow.session();
        assert!(session.logged_in);
        assert_eq!(session.display_name.as_deref(), Some("Alice"));
        assert_eq!(session.user_email.as_deref(), Some("alice@gmail.com"));
    }

    #[test]
    fn test_logout_renders_only_confirmation() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Diabetes, &mut sink);

        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Logout, &mut sink);
        assert_eq!(
            sink.content,
            vec![Content::notice(NoticeLevel::Success, "You have been logged out.")]
        );
        assert_eq!(sink.backdrop, Backdrop::Plain);
        assert_eq!(h.workflow.offered_menu(), &[MenuEntry::Login, MenuEntry::Signup]);
    }

    #[test]
    fn test_logged_out_cannot_reach_prediction() {
        let mut h = harness(Stub::Output(1.0));
        let mut sink = RecordingSink::default();

        assert_eq!(
            h.workflow.select(MenuEntry::Diabetes, &mut sink),
            Route::NotRecognized(MenuEntry::Diabetes)
        );
        let err = h
            .workflow
            .submit_prediction(diabetes_request(), &mut sink)
            .unwrap_err();
        assert_eq!(err, FormError::ViewUnavailable);
        assert!(!sink.content.iter().any(|c| matches!(c, Content::Heading(_))));
    }

    #[test]
    fn test_unoffered_entry_renders_only_warning() {
        let mut h = harness(Stub::Output(1.0));
        let mut sink = RecordingSink::default();

        h.workflow.select(MenuEntry::Diabetes, &mut sink);

        assert_eq!(
            sink.content,
            vec![Content::notice(NoticeLevel::Warning, "Page not recognized.")]
        );
        assert_eq!(sink.backdrop, Backdrop::Plain);
        assert_eq!(*h.workflow.session(), SessionState::new());
    }

    #[test]
    fn test_input_error_message_names_field() {
        let err = FormError::from(InputError::BelowMinimum {
            field: "Glucose Level",
            min: 0.0,
        });
        assert!(matches!(err, FormError::InvalidInput(_)));
        assert_eq!(err.user_message(), "Glucose Level: value must be at least 0");
    }

    #[test]
    fn test_diabetes_positive_report() {
        let mut h = signed_in(Stub::Output(1.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Diabetes, &mut sink);
        assert_eq!(sink.backdrop, Backdrop::Diabetes);

        let result = h
            .workflow
            .submit_prediction(diabetes_request(), &mut sink)
            .expect("prediction");
        assert_eq!(result.label, Label::Positive);

        assert!(sink
            .content
            .contains(&Content::Heading("Test Result: Positive".into())));
        assert!(sink.content.contains(&Content::InfoBlock(vec![
            ("Patient Name".into(), "Jane".into()),
            ("Age".into(), "35".into()),
        ])));
        let table = sink
            .content
            .iter()
            .find_map(|c| match c {
                Content::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .expect("reference table");
        assert_eq!(table.len(), 7);
        assert_eq!(table[5], vec!["BMI", "28.50", "18.5-24.9", "kg/m^2"]);
        assert_eq!(
            sink.notices().last().map(|(level, _)| *level),
            Some(NoticeLevel::Info)
        );
    }

    #[test]
    fn test_diabetes_negative_report() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Diabetes, &mut sink);
        let result = h
            .workflow
            .submit_prediction(diabetes_request(), &mut sink)
            .expect("prediction");
        assert_eq!(result.label, Label::Negative);
    }

    #[test]
    fn test_heart_disease_report_has_no_table() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::HeartDisease, &mut sink);

        let request = PredictionRequest::HeartDisease {
            features: crate::domain::HeartDiseaseFeatures {
                age: 52.0,
                ..Default::default()
            },
        };
        h.workflow
            .submit_prediction(request, &mut sink)
            .expect("prediction");

        assert!(!sink.content.iter().any(|c| matches!(c, Content::Table { .. })));
        assert!(sink
            .content
            .contains(&Content::InfoBlock(vec![("Age".into(), "52".into())])));
        assert!(sink.notices().is_empty());
    }

    #[test]
    fn test_prediction_requires_matching_view() {
        let mut h = signed_in(Stub::Output(1.0));
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::HeartDisease, &mut sink);

        let err = h
            .workflow
            .submit_prediction(diabetes_request(), &mut sink)
            .unwrap_err();
        assert_eq!(err, FormError::ViewUnavailable);
    }

    #[test]
    fn test_prediction_failure_leaves_session_unchanged() {
        let mut h = signed_in(Stub::Fail);
        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Diabetes, &mut sink);
        let before = h.workflow.session().clone();

        let mut sink = RecordingSink::default();
        let err = h
            .workflow
            .submit_prediction(diabetes_request(), &mut sink)
            .unwrap_err();

        assert_eq!(err, FormError::PredictionFailed);
        assert_eq!(h.workflow.session(), &before);
        assert_eq!(
            sink.content,
            vec![Content::notice(
                NoticeLevel::Error,
                "Error during prediction. Check your model or input data."
            )]
        );
    }

    #[test]
    fn test_home_and_parkinsons_bodies() {
        let mut h = signed_in(Stub::Output(0.0));

        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Home, &mut sink);
        assert_eq!(sink.backdrop, Backdrop::Plain);
        assert_eq!(
            sink.content.first(),
            Some(&Content::Title(View::Home.title().into()))
        );
        assert!(sink.content.iter().any(|c| matches!(c, Content::List(items) if items.len() == 3)));

        let mut sink = RecordingSink::default();
        h.workflow.select(MenuEntry::Parkinsons, &mut sink);
        assert_eq!(sink.backdrop, Backdrop::Parkinsons);
        assert_eq!(
            sink.notices(),
            vec![(NoticeLevel::Info, PARKINSONS_PLACEHOLDER.to_string())]
        );
    }

    #[test]
    fn test_signed_in_session_cannot_resubmit_auth_forms() {
        let mut h = signed_in(Stub::Output(0.0));
        let mut sink = RecordingSink::default();
        let err = h
            .workflow
            .submit_signup(signup_form("Bob", "bob@gmail.com", "pw", "pw"), &mut sink)
            .unwrap_err();
        assert_eq!(err, FormError::ViewUnavailable);
        assert_eq!(h.store.len(), 1);
        assert_eq!(h.workflow.session().display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(35.0), "35");
        assert_eq!(format_value(28.5), "28.50");
        assert_eq!(format_value(0.0), "0");
    }
}
