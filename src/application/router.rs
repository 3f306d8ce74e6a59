//! View router: maps a menu selection and the login state to one view.

use crate::domain::{MenuEntry, SessionState, View};

/// What the current interaction cycle should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Render this view's body.
    Render(View),
    /// The session was just signed out; show the confirmation only.
    LoggedOut,
    /// The entry is not offered in the current state; show a warning only.
    NotRecognized(MenuEntry),
}

/// Process one menu selection.
///
/// Logout is handled before anything renders. Entries outside the offered
/// set never reach a view, so a signed-out session cannot open a prediction
/// form. Only signed-in views update `active_view`.
pub fn route(session: &mut SessionState, entry: MenuEntry) -> Route {
    if !session.offers(entry) {
        tracing::warn!(?entry, state = ?session.auth_state(), "Menu entry not offered");
        return Route::NotRecognized(entry);
    }

    let Some(view) = entry.view() else {
        session.logout();
        tracing::info!("Session logged out");
        return Route::LoggedOut;
    };

    if view.requires_login() {
        session.active_view = view;
    }
    tracing::debug!(?view, "Routed");
    Route::Render(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LOGGED_IN_MENU, LOGGED_OUT_MENU};

    fn logged_in() -> SessionState {
        let mut session = SessionState::new();
        session.establish("alice@gmail.com", "Alice");
        session
    }

    #[test]
    fn test_logged_out_reaches_login_and_signup_only() {
        let mut session = SessionState::new();
        assert_eq!(route(&mut session, MenuEntry::Login), Route::Render(View::Login));
        assert_eq!(route(&mut session, MenuEntry::Signup), Route::Render(View::Signup));

        for entry in LOGGED_IN_MENU {
            assert_eq!(route(&mut session, entry), Route::NotRecognized(entry));
        }
        assert_eq!(session, SessionState::new());
    }

    #[test]
    fn test_logged_in_selection_sets_active_view() {
        let mut session = logged_in();
        assert_eq!(
            route(&mut session, MenuEntry::Diabetes),
            Route::Render(View::Diabetes)
        );
        assert_eq!(session.active_view, View::Diabetes);

        assert_eq!(
            route(&mut session, MenuEntry::Parkinsons),
            Route::Render(View::Parkinsons)
        );
        assert_eq!(session.active_view, View::Parkinsons);
        assert!(session.logged_in);
    }

    #[test]
    fn test_logged_in_cannot_open_login_forms() {
        let mut session = logged_in();
        session.active_view = View::HeartDisease;
        for entry in LOGGED_OUT_MENU {
            assert_eq!(route(&mut session, entry), Route::NotRecognized(entry));
        }
        assert_eq!(session.active_view, View::HeartDisease);
    }

    #[test]
    fn test_logout_resets_session() {
        let mut session = logged_in();
        route(&mut session, MenuEntry::HeartDisease);

        assert_eq!(route(&mut session, MenuEntry::Logout), Route::LoggedOut);
        assert_eq!(session, SessionState::new());
        assert_eq!(session.offered_menu(), &LOGGED_OUT_MENU);
    }

    #[test]
    fn test_logout_when_logged_out_is_not_recognized() {
        let mut session = SessionState::new();
        assert_eq!(
            route(&mut session, MenuEntry::Logout),
            Route::NotRecognized(MenuEntry::Logout)
        );
    }
}
