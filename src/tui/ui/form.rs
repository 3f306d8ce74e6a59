//! Input forms: sign-up, login and the prediction forms.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::application::{LoginForm, SignupForm};
use crate::domain::{
    DiabetesFeatures, Disease, FieldSpec, HeartDiseaseFeatures, InputError, PredictionRequest,
};
use crate::ports::Backdrop;
use crate::tui::styles::MedicalTheme;

/// What a field accepts and how it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Masked on screen
    Secret,
    Number,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, hint: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            hint,
            kind,
            value: String::new(),
        }
    }

    fn number(spec: &FieldSpec) -> Self {
        Self::new(spec.label, spec.hint, FieldKind::Number)
    }

    /// Empty number fields read as zero, like a fresh numeric input.
    fn parse_number(&self) -> Result<f64, InputError> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Ok(0.0);
        }
        raw.parse()
            .map_err(|_| InputError::NotANumber { field: self.label })
    }
}

/// Which form this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Signup,
    Login,
    Prediction(Disease),
}

pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl FormState {
    #[must_use]
    pub fn signup() -> Self {
        Self::with_fields(
            FormKind::Signup,
            vec![
                FormField::new("Full Name", "", FieldKind::Text),
                FormField::new("Email", "example@gmail.com", FieldKind::Text),
                FormField::new("Password", "", FieldKind::Secret),
                FormField::new("Confirm Password", "", FieldKind::Secret),
            ],
        )
    }

    #[must_use]
    pub fn login() -> Self {
        Self::with_fields(
            FormKind::Login,
            vec![
                FormField::new("Email", "example@gmail.com", FieldKind::Text),
                FormField::new("Password", "", FieldKind::Secret),
            ],
        )
    }

    /// Prediction form for `disease`, or `None` if it has no form.
    #[must_use]
    pub fn prediction(disease: Disease) -> Option<Self> {
        let specs = disease.fields();
        if specs.is_empty() {
            return None;
        }

        let mut fields = Vec::with_capacity(specs.len() + 1);
        if disease == Disease::Diabetes {
            fields.push(FormField::new("Patient Name", "", FieldKind::Text));
        }
        fields.extend(specs.iter().map(FormField::number));
        Some(Self::with_fields(FormKind::Prediction(disease), fields))
    }

    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            selected_field: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field if the field accepts it.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        let accepted = match field.kind {
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
        };
        if accepted {
            field.value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.zeroize();
    }

    /// Wipe every field buffer.
    ///
    /// Called after each submission so typed values do not outlive it.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.selected_field = 0;
    }

    fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn to_signup_form(&self) -> SignupForm {
        SignupForm {
            name: self.value(0),
            email: self.value(1),
            password: self.value(2),
            confirm_password: self.value(3),
        }
    }

    #[must_use]
    pub fn to_login_form(&self) -> LoginForm {
        LoginForm {
            email: self.value(0),
            password: self.value(1),
        }
    }

    /// Build the typed request for a prediction form.
    ///
    /// # Errors
    /// Returns `InputError` if a value is not a number or is below its field
    /// minimum. Also returned for forms that are not prediction forms.
    pub fn to_request(&self) -> Result<PredictionRequest, InputError> {
        let FormKind::Prediction(disease) = self.kind else {
            return Err(InputError::Arity {
                expected: 0,
                got: self.fields.len(),
            });
        };

        let numbers = self
            .fields
            .iter()
            .filter(|f| f.kind == FieldKind::Number)
            .map(FormField::parse_number)
            .collect::<Result<Vec<f64>, _>>()?;

        match disease {
            Disease::Diabetes => Ok(PredictionRequest::Diabetes {
                patient_name: self.value(0).trim().to_string(),
                features: DiabetesFeatures::from_values(&numbers)?,
            }),
            Disease::HeartDisease => Ok(PredictionRequest::HeartDisease {
                features: HeartDiseaseFeatures::from_values(&numbers)?,
            }),
            Disease::Parkinsons => Err(InputError::Arity {
                expected: 0,
                got: numbers.len(),
            }),
        }
    }

    /// Fill a prediction form with a plausible patient.
    pub fn load_sample_data(&mut self) {
        let sample: &[&str] = match self.kind {
            FormKind::Prediction(Disease::Diabetes) => {
                &["Jane Doe", "2", "130", "70", "20", "80", "28.5", "0.5", "35"]
            }
            FormKind::Prediction(Disease::HeartDisease) => &[
                "63", "1", "3", "145", "233", "1", "0", "150", "0", "2.3", "0", "0", "1",
            ],
            _ => return,
        };
        for (field, value) in self.fields.iter_mut().zip(sample) {
            field.value = (*value).to_string();
        }
    }

    fn submit_label(&self) -> &'static str {
        match self.kind {
            FormKind::Signup => "Signup",
            FormKind::Login => "Login",
            FormKind::Prediction(disease) => disease.submit_label(),
        }
    }
}

/// Render a form in `area`.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, focused: bool, backdrop: Backdrop) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    // long prediction forms go in two columns
    if state.fields.len() > 6 {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);
        let mid = (state.fields.len() + 1) / 2;
        render_field_column(f, columns[0], state, 0..mid, focused, backdrop);
        render_field_column(f, columns[1], state, mid..state.fields.len(), focused, backdrop);
    } else {
        render_field_column(f, chunks[0], state, 0..state.fields.len(), focused, backdrop);
    }

    let submit = Paragraph::new(Line::from(vec![
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled(state.submit_label(), MedicalTheme::subtitle(backdrop)),
    ]));
    f.render_widget(submit, chunks[1]);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &FormState,
    range: std::ops::Range<usize>,
    focused: bool,
    backdrop: Backdrop,
) {
    let constraints: Vec<Constraint> = range
        .clone()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, index) in range.enumerate() {
        let field = &state.fields[index];
        let is_selected = focused && index == state.selected_field;

        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(backdrop), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match (field.value.is_empty(), field.kind) {
            (true, _) => Span::styled(field.hint, MedicalTheme::text_muted()),
            (false, FieldKind::Secret) => Span::styled(
                "•".repeat(field.value.chars().count()),
                MedicalTheme::text(),
            ),
            (false, _) => Span::styled(field.value.as_str(), MedicalTheme::text()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[slot]);
    }
}
