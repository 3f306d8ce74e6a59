//! Session state, views and the menu entries offered in each state.

use serde::{Deserialize, Serialize};

/// A screen the router can select for the current interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    Login,
    Signup,
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl View {
    /// Title rendered at the top of the view.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Welcome to Predictive Disease Detection App",
            Self::Login => "Login Page",
            Self::Signup => "Signup Page",
            Self::Diabetes => "Diabetes Prediction using ML",
            Self::HeartDisease => "Heart Disease Prediction using ML",
            Self::Parkinsons => "Parkinson's Disease Prediction using ML",
        }
    }

    /// Whether this view may only be shown to a signed-in user.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }
}

/// One entry of the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuEntry {
    Login,
    Signup,
    Home,
    Diabetes,
    HeartDisease,
    Parkinsons,
    Logout,
}

impl MenuEntry {
    /// Label shown in the sidebar.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::Home => "Home",
            Self::Diabetes => "Diabetes Prediction",
            Self::HeartDisease => "Heart Disease Prediction",
            Self::Parkinsons => "Parkinson's Prediction",
            Self::Logout => "Logout",
        }
    }

    /// The view this entry renders. `Logout` is a transition, not a view.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        match self {
            Self::Login => Some(View::Login),
            Self::Signup => Some(View::Signup),
            Self::Home => Some(View::Home),
            Self::Diabetes => Some(View::Diabetes),
            Self::HeartDisease => Some(View::HeartDisease),
            Self::Parkinsons => Some(View::Parkinsons),
            Self::Logout => None,
        }
    }
}

/// Entries offered while signed out.
pub const LOGGED_OUT_MENU: [MenuEntry; 2] = [MenuEntry::Login, MenuEntry::Signup];

/// Entries offered while signed in.
pub const LOGGED_IN_MENU: [MenuEntry; 5] = [
    MenuEntry::Home,
    MenuEntry::Diabetes,
    MenuEntry::HeartDisease,
    MenuEntry::Parkinsons,
    MenuEntry::Logout,
];

/// Coarse authentication state derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Per-session record. Never persisted; dropped with the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub logged_in: bool,
    pub user_email: Option<String>,
    pub display_name: Option<String>,
    pub active_view: View,
}

impl SessionState {
    /// Fresh signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        if self.logged_in {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    /// Menu entries available in the current state.
    #[must_use]
    pub fn offered_menu(&self) -> &'static [MenuEntry] {
        match self.auth_state() {
            AuthState::LoggedOut => &LOGGED_OUT_MENU,
            AuthState::LoggedIn => &LOGGED_IN_MENU,
        }
    }

    #[must_use]
    pub fn offers(&self, entry: MenuEntry) -> bool {
        self.offered_menu().contains(&entry)
    }

    /// Transition to signed in after a successful sign-up or login.
    pub fn establish(&mut self, email: impl Into<String>, display_name: impl Into<String>) {
        self.logged_in = true;
        self.user_email = Some(email.into());
        self.display_name = Some(display_name.into());
        self.active_view = View::Home;
    }

    /// Reset to the initial signed-out value.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}
