//! Main TUI application state machine.
//!
//! Handles:
//! - Sidebar navigation over the offered menu
//! - Form input and submission
//! - Rendering the content of the last cycle

use std::io;
use std::panic;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::{FormError, Route, Workflow};
use crate::domain::{Disease, Label, View};
use crate::ports::{Content, CredentialStore, DisplaySink, NoticeLevel, Predictor};

use super::sink::ContentBuffer;
use super::styles::SIDEBAR_WIDTH;
use super::ui::{
    form::{render_form, FormKind, FormState},
    render_disclaimer, render_key_hints,
    report::render_report,
    render_sidebar,
};

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Form,
}

/// Main application state
pub struct App<S, P>
where
    S: CredentialStore,
    P: Predictor,
{
    workflow: Workflow<S, P>,

    /// Content written by the last cycle
    buffer: ContentBuffer,

    /// Index into the offered menu
    menu_index: usize,

    focus: Focus,

    /// View whose body is on screen
    current_view: Option<View>,

    /// Form of the current view, if it has one
    form: Option<FormState>,

    /// Label of the last prediction shown
    last_label: Option<Label>,

    should_quit: bool,
}

impl<S, P> App<S, P>
where
    S: CredentialStore,
    P: Predictor,
{
    /// Create the application around a fresh session and open the first
    /// offered entry.
    pub fn new(workflow: Workflow<S, P>) -> Self {
        let mut app = Self {
            workflow,
            buffer: ContentBuffer::new(),
            menu_index: 0,
            focus: Focus::Menu,
            current_view: None,
            form: None,
            last_label: None,
            should_quit: false,
        };
        app.open_selected();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = with_logged_panics(|| self.main_loop(&mut terminal));

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let backdrop = self.buffer.backdrop();

                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2), Constraint::Length(2)])
                    .split(area);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                    .split(rows[0]);

                render_sidebar(
                    f,
                    columns[0],
                    self.workflow.offered_menu(),
                    self.menu_index,
                    self.focus == Focus::Menu,
                    backdrop,
                );

                match &self.form {
                    Some(form) => {
                        let main = Layout::default()
                            .direction(Direction::Horizontal)
                            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                            .split(columns[1]);
                        render_form(f, main[0], form, self.focus == Focus::Form, backdrop);
                        render_report(f, main[1], self.buffer.blocks(), backdrop, self.last_label);
                    }
                    None => {
                        render_report(f, columns[1], self.buffer.blocks(), backdrop, self.last_label);
                    }
                }

                let has_sample = matches!(
                    self.form.as_ref().map(|form| form.kind),
                    Some(FormKind::Prediction(_))
                );
                render_key_hints(f, rows[1], self.focus == Focus::Form, has_sample);
                render_disclaimer(f, rows[2]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Menu => self.handle_menu_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        let len = self.workflow.offered_menu().len();
        match key {
            KeyCode::Up => {
                self.menu_index = (self.menu_index + len - 1) % len;
            }
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1) % len;
            }
            KeyCode::Enter => {
                self.open_selected();
                if self.form.is_some() {
                    self.focus = Focus::Form;
                }
            }
            KeyCode::Tab | KeyCode::Right => {
                if self.form.is_some() {
                    self.focus = Focus::Form;
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let Some(form) = self.form.as_mut() else {
            self.focus = Focus::Menu;
            return;
        };

        match key {
            KeyCode::Esc => self.focus = Focus::Menu,
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::F(2) => form.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    /// Start a cycle for the highlighted menu entry.
    fn open_selected(&mut self) {
        let offered = self.workflow.offered_menu();
        let Some(&entry) = offered.get(self.menu_index) else {
            self.menu_index = 0;
            return;
        };

        self.buffer.begin_cycle();
        self.last_label = None;

        match self.workflow.select(entry, &mut self.buffer) {
            Route::Render(view) => {
                self.current_view = Some(view);
                self.form = form_for(view);
            }
            Route::LoggedOut | Route::NotRecognized(_) => {
                self.current_view = None;
                self.form = None;
                self.menu_index = 0;
                self.focus = Focus::Menu;
            }
        }
    }

    /// Submit the current form. The view body is rendered again above the
    /// outcome, as a fresh cycle.
    fn submit_form(&mut self) {
        let (Some(view), Some(form)) = (self.current_view, self.form.as_mut()) else {
            return;
        };

        self.buffer.begin_cycle();
        self.last_label = None;
        self.workflow.render_view(view, &mut self.buffer);

        let kind = form.kind;
        match kind {
            FormKind::Signup => {
                let data = form.to_signup_form();
                form.clear_sensitive();
                if self.workflow.submit_signup(data, &mut self.buffer).is_ok() {
                    self.after_sign_in();
                }
            }
            FormKind::Login => {
                let data = form.to_login_form();
                form.clear_sensitive();
                if self.workflow.submit_login(data, &mut self.buffer).is_ok() {
                    self.after_sign_in();
                }
            }
            FormKind::Prediction(_) => match form.to_request() {
                Ok(request) => {
                    form.clear_sensitive();
                    if let Ok(result) = self.workflow.submit_prediction(request, &mut self.buffer) {
                        self.last_label = Some(result.label);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Form input rejected");
                    self.buffer.emit(Content::notice(
                        NoticeLevel::Error,
                        FormError::from(e).user_message(),
                    ));
                }
            },
        }
    }

    /// Land on Home with the sign-in notice carried over.
    fn after_sign_in(&mut self) {
        let notices = self.buffer.take_notices();
        self.workflow.render_view(View::Home, &mut self.buffer);
        for notice in notices {
            self.buffer.emit(notice);
        }

        self.current_view = Some(View::Home);
        self.form = None;
        self.menu_index = 0;
        self.focus = Focus::Menu;
    }
}

fn form_for(view: View) -> Option<FormState> {
    match view {
        View::Login => Some(FormState::login()),
        View::Signup => Some(FormState::signup()),
        View::Diabetes => FormState::prediction(Disease::Diabetes),
        View::HeartDisease => FormState::prediction(Disease::HeartDisease),
        View::Home | View::Parkinsons => None,
    }
}

/// Run `f` with panic messages sent to the log instead of stderr, which is
/// the alternate screen while the UI is up.
fn with_logged_panics<T>(f: impl FnOnce() -> T) -> T {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "Panic while the terminal UI was active");
    }));
    let out = f();
    panic::set_hook(previous);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCredentialStore;
    use crate::application::prediction_stubs::{Stub, StubPredictor};
    use crate::application::{AuthService, PredictionDispatcher};
    use crate::domain::MenuEntry;
    use std::sync::Arc;

    fn app(diabetes: Stub) -> App<InMemoryCredentialStore, StubPredictor> {
        let store = Arc::new(InMemoryCredentialStore::new());
        let dispatcher = PredictionDispatcher::new(
            StubPredictor::new(diabetes, 8),
            StubPredictor::new(Stub::Output(0.0), 13),
        );
        App::new(Workflow::new(AuthService::new(store), dispatcher))
    }

    fn press(app: &mut App<InMemoryCredentialStore, StubPredictor>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App<InMemoryCredentialStore, StubPredictor>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn select(app: &mut App<InMemoryCredentialStore, StubPredictor>, entry: MenuEntry) {
        let index = app
            .workflow
            .offered_menu()
            .iter()
            .position(|e| *e == entry)
            .expect("entry offered");
        app.focus = Focus::Menu;
        app.menu_index = index;
        press(app, KeyCode::Enter);
    }

    fn sign_up(app: &mut App<InMemoryCredentialStore, StubPredictor>) {
        select(app, MenuEntry::Signup);
        for value in ["Alice", "alice@gmail.com", "pw1", "pw1"] {
            type_str(app, value);
            press(app, KeyCode::Tab);
        }
        press(app, KeyCode::Enter);
    }

    fn has_notice(app: &App<InMemoryCredentialStore, StubPredictor>, message: &str) -> bool {
        app.buffer.blocks().iter().any(|c| {
            matches!(c, Content::Notice { message: m, .. } if m == message)
        })
    }

    #[test]
    fn test_starts_on_login_page() {
        let app = app(Stub::Output(0.0));
        assert_eq!(app.current_view, Some(View::Login));
        assert!(matches!(app.form.as_ref().map(|f| f.kind), Some(FormKind::Login)));
        assert_eq!(
            app.buffer.blocks().first(),
            Some(&Content::Title(View::Login.title().into()))
        );
    }

    #[test]
    fn test_signup_lands_on_home() {
        let mut app = app(Stub::Output(0.0));
        sign_up(&mut app);

        assert!(app.workflow.session().logged_in);
        assert_eq!(app.current_view, Some(View::Home));
        assert!(app.form.is_none());
        assert_eq!(app.focus, Focus::Menu);
        assert!(has_notice(&app, "Account created successfully for Alice!"));
        assert_eq!(app.workflow.offered_menu()[app.menu_index], MenuEntry::Home);
    }

    #[test]
    fn test_signup_mismatch_stays_on_form() {
        let mut app = app(Stub::Output(0.0));
        select(&mut app, MenuEntry::Signup);
        for value in ["Alice", "alice@gmail.com", "pw1", "pw2"] {
            type_str(&mut app, value);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert!(!app.workflow.session().logged_in);
        assert_eq!(app.current_view, Some(View::Signup));
        assert!(has_notice(&app, "Passwords do not match. Please try again."));
        // password buffers are wiped after submission
        let form = app.form.as_ref().expect("form");
        assert!(form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_diabetes_prediction_via_keys() {
        let mut app = app(Stub::Output(1.0));
        sign_up(&mut app);
        select(&mut app, MenuEntry::Diabetes);
        assert_eq!(app.focus, Focus::Form);

        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.last_label, Some(Label::Positive));
        assert!(app
            .buffer
            .blocks()
            .contains(&Content::Heading("Test Result: Positive".into())));
    }

    #[test]
    fn test_bad_number_reports_field() {
        let mut app = app(Stub::Output(1.0));
        sign_up(&mut app);
        select(&mut app, MenuEntry::Diabetes);

        // skip the name field and enter a malformed number
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1..2");
        press(&mut app, KeyCode::Enter);

        assert!(app.last_label.is_none());
        assert!(has_notice(&app, "Number of Pregnancies: invalid number"));
    }

    #[test]
    fn test_logout_returns_to_logged_out_menu() {
        let mut app = app(Stub::Output(0.0));
        sign_up(&mut app);
        select(&mut app, MenuEntry::Logout);

        assert!(!app.workflow.session().logged_in);
        assert_eq!(app.workflow.offered_menu(), &[MenuEntry::Login, MenuEntry::Signup]);
        assert_eq!(app.menu_index, 0);
        assert!(app.form.is_none());
        assert!(has_notice(&app, "You have been logged out."));
    }

    #[test]
    fn test_predictor_panic_shows_generic_error() {
        let mut app = app(Stub::Panic);
        sign_up(&mut app);
        select(&mut app, MenuEntry::Diabetes);
        press(&mut app, KeyCode::F(2));

        with_logged_panics(|| press(&mut app, KeyCode::Enter));

        assert!(app.last_label.is_none());
        assert!(has_notice(
            &app,
            "Error during prediction. Check your model or input data."
        ));
        assert!(app.workflow.session().logged_in);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app(Stub::Output(0.0));
        app.focus = Focus::Form;
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
