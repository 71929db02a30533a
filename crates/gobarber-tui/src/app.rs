//! Application state management for the GoBarber terminal client.
//!
//! `App` is the composition root of the UI. It receives the shared
//! `SessionStore` at construction, mirrors its `AuthState` through a watch
//! receiver, and owns the local state of every screen: form drafts, the
//! open alert, the quit confirmation.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use gobarber_core::forms::{
    credentials_from, registration_from, sign_in_schema, sign_up_schema, FIELD_EMAIL, FIELD_NAME,
    FIELD_PASSWORD,
};
use gobarber_core::{AuthState, Config, SessionError, SessionStore, UserRecord};

use crate::routes::{AuthScreen, Route};
use crate::ui::form::{Form, TextField};

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Blocking modal message, dismissed with Enter or Esc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn sign_in_failed(err: &SessionError) -> Self {
        match err {
            SessionError::Storage(_) => Alert::new(
                "Sign-in failed",
                "Your session could not be saved on this device. Please try again.",
            ),
            SessionError::Remote(_) => Alert::new(
                "Authentication error",
                "Something went wrong while signing in, check your credentials.",
            ),
        }
    }
}

/// What happened to a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are shown inline
    Invalid,
    /// The remote call (or storage) failed; an alert is open
    Failed,
    Succeeded,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    config: Config,
    /// Where to persist config changes; `None` keeps them in memory
    config_path: Option<PathBuf>,
    session: Arc<SessionStore>,
    auth_rx: watch::Receiver<AuthState>,

    /// Last auth state seen by the UI
    pub auth: AuthState,
    pub state: AppState,
    pub auth_screen: AuthScreen,

    pub sign_in_form: Form,
    pub sign_up_form: Form,

    pub alert: Option<Alert>,
    pub status_message: Option<String>,
    pub session_started_at: Option<DateTime<Local>>,

    /// Frame counter driving the loading spinner
    pub tick: usize,
}

impl App {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        session: Arc<SessionStore>,
        initial_email: Option<String>,
    ) -> Self {
        let auth_rx = session.subscribe();
        let auth = auth_rx.borrow().clone();
        let session_started_at = auth.is_authenticated().then(Local::now);

        let mut sign_in_form = Form::new(
            vec![
                TextField::new(FIELD_EMAIL, "E-mail"),
                TextField::new(FIELD_PASSWORD, "Password").secure(),
            ],
            "Sign in",
            "Create an account",
        );
        if let Some(email) = initial_email.filter(|e| !e.is_empty()) {
            sign_in_form.set_value(FIELD_EMAIL, &email);
            sign_in_form.focus_field(FIELD_PASSWORD);
        }

        let sign_up_form = Form::new(
            vec![
                TextField::new(FIELD_NAME, "Name"),
                TextField::new(FIELD_EMAIL, "E-mail"),
                TextField::new(FIELD_PASSWORD, "Password").secure(),
            ],
            "Register",
            "Back to sign in",
        );

        debug!(loading = auth.loading, authenticated = auth.is_authenticated(), "App created");

        Self {
            config,
            config_path,
            session,
            auth_rx,
            auth,
            state: AppState::Normal,
            auth_screen: AuthScreen::SignIn,
            sign_in_form,
            sign_up_form,
            alert: None,
            status_message: None,
            session_started_at,
            tick: 0,
        }
    }

    pub fn route(&self) -> Route {
        Route::select(&self.auth)
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.auth.user()
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    // =========================================================================
    // Session state
    // =========================================================================

    /// Pull the latest state from the session store, if it changed
    pub fn sync_auth_state(&mut self) {
        if !self.auth_rx.has_changed().unwrap_or(false) {
            return;
        }
        let next = self.auth_rx.borrow_and_update().clone();
        self.apply_auth_state(next);
    }

    fn apply_auth_state(&mut self, next: AuthState) {
        let before = Route::select(&self.auth);
        let after = Route::select(&next);
        self.auth = next;
        if before == after {
            return;
        }

        debug!(?before, ?after, "Route changed");
        match after {
            Route::Authenticated => {
                self.session_started_at = Some(Local::now());
                self.sign_in_form.clear_value(FIELD_PASSWORD);
                self.status_message = None;
            }
            Route::Unauthenticated => {
                self.session_started_at = None;
                self.auth_screen = AuthScreen::SignIn;
                self.sign_up_form.reset();
                self.sign_in_form.clear_errors();
                self.sign_in_form.clear_value(FIELD_PASSWORD);
                let has_email = self
                    .sign_in_form
                    .field(FIELD_EMAIL)
                    .map(|f| !f.value().is_empty())
                    .unwrap_or(false);
                self.sign_in_form
                    .focus_field(if has_email { FIELD_PASSWORD } else { FIELD_EMAIL });
            }
            Route::Loading => {}
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn show_sign_up(&mut self) {
        self.sign_in_form.clear_errors();
        self.auth_screen = AuthScreen::SignUp;
    }

    pub fn show_sign_in(&mut self) {
        self.sign_up_form.clear_errors();
        self.auth_screen = AuthScreen::SignIn;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // =========================================================================
    // Form submission
    // =========================================================================

    /// Validate the sign-in form and, if it passes, sign in
    pub async fn submit_sign_in(&mut self) -> SubmitOutcome {
        self.sign_in_form.clear_errors();
        let data = self.sign_in_form.data();

        if let Err(errors) = sign_in_schema().validate(&data) {
            debug!(fields = errors.len(), "Sign-in form invalid");
            self.sign_in_form.set_errors(&errors);
            return SubmitOutcome::Invalid;
        }

        let credentials = credentials_from(&data);
        match self.session.sign_in(&credentials).await {
            Ok(_) => {
                self.remember_email(&credentials.email);
                self.sync_auth_state();
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                error!(error = %e, "Sign-in failed");
                self.alert = Some(Alert::sign_in_failed(&e));
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate the sign-up form and, if it passes, register the account
    pub async fn submit_sign_up(&mut self) -> SubmitOutcome {
        self.sign_up_form.clear_errors();
        let data = self.sign_up_form.data();

        if let Err(errors) = sign_up_schema().validate(&data) {
            debug!(fields = errors.len(), "Sign-up form invalid");
            self.sign_up_form.set_errors(&errors);
            return SubmitOutcome::Invalid;
        }

        let registration = registration_from(&data);
        match self.session.register(&registration).await {
            Ok(()) => {
                self.sign_up_form.reset();
                self.show_sign_in();
                self.sign_in_form.set_value(FIELD_EMAIL, &registration.email);
                self.sign_in_form.clear_value(FIELD_PASSWORD);
                self.sign_in_form.focus_field(FIELD_PASSWORD);
                self.alert = Some(Alert::new("Registration complete", "You can now sign in."));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                error!(error = %e, "Sign-up failed");
                self.alert = Some(Alert::new(
                    "Registration failed",
                    "Something went wrong while creating your account, please try again.",
                ));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn sign_out(&mut self) {
        match self.session.sign_out().await {
            Ok(()) => {
                self.sync_auth_state();
                self.status_message = Some("Signed out".to_string());
            }
            Err(e) => {
                error!(error = %e, "Sign-out failed");
                self.alert = Some(Alert::new(
                    "Sign-out failed",
                    "The saved session could not be removed from this device.",
                ));
            }
        }
    }

    fn remember_email(&mut self, email: &str) {
        if self.config.last_email.as_deref() == Some(email) {
            return;
        }
        self.config.last_email = Some(email.to_string());
        if let Some(ref path) = self.config_path {
            match self.config.save_to(path) {
                Ok(()) => info!("Remembered sign-in e-mail"),
                Err(e) => warn!(error = %e, "Failed to save config"),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
