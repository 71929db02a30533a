//! Route selection between the loading indicator and the two screen sets.

use gobarber_core::AuthState;

/// Which screen set is reachable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Startup restore still running: only a progress indicator is drawn
    Loading,
    /// A user is signed in: the dashboard
    Authenticated,
    /// Nobody is signed in: sign-in / sign-up
    Unauthenticated,
}

impl Route {
    pub fn select(state: &AuthState) -> Self {
        if state.loading {
            Route::Loading
        } else if state.is_authenticated() {
            Route::Authenticated
        } else {
            Route::Unauthenticated
        }
    }
}

/// Screens of the unauthenticated set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScreen {
    SignIn,
    SignUp,
}

impl AuthScreen {
    pub fn title(&self) -> &'static str {
        match self {
            AuthScreen::SignIn => "Sign in",
            AuthScreen::SignUp => "Create your account",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobarber_core::{Session, UserRecord};
    use serde_json::json;

    fn state(loading: bool, signed_in: bool) -> AuthState {
        AuthState {
            loading,
            session: signed_in.then(|| Session {
                token: "t1".to_string(),
                user: UserRecord::new(json!({"id": "u1"})),
            }),
        }
    }

    #[test]
    fn test_select() {
        assert_eq!(Route::select(&state(true, false)), Route::Loading);
        assert_eq!(Route::select(&state(false, false)), Route::Unauthenticated);
        assert_eq!(Route::select(&state(false, true)), Route::Authenticated);
    }

    #[test]
    fn test_loading_wins_over_session() {
        // Not reachable through the store, but loading must still take priority
        assert_eq!(Route::select(&state(true, true)), Route::Loading);
    }
}
