//! Keyboard input handling for the TUI.
//!
//! Keys go to the topmost layer first: the alert, then the quit
//! confirmation, then whichever route view is on screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::app::{App, AppState};
use crate::routes::{AuthScreen, Route};
use crate::ui::form::FormAction;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Alerts block everything until dismissed
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.route() {
        Route::Loading => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.state = AppState::ConfirmingQuit;
            }
        }
        Route::Unauthenticated => match app.auth_screen {
            AuthScreen::SignIn => handle_sign_in_input(app, key).await,
            AuthScreen::SignUp => handle_sign_up_input(app, key).await,
        },
        Route::Authenticated => handle_dashboard_input(app, key).await,
    }

    Ok(false)
}

async fn handle_sign_in_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.state = AppState::ConfirmingQuit;
        return;
    }

    match app.sign_in_form.handle_key(key) {
        FormAction::Submit => {
            let outcome = app.submit_sign_in().await;
            debug!(?outcome, "Sign-in submitted");
        }
        FormAction::FollowLink => app.show_sign_up(),
        FormAction::None => {}
    }
}

async fn handle_sign_up_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.show_sign_in();
        return;
    }

    match app.sign_up_form.handle_key(key) {
        FormAction::Submit => {
            let outcome = app.submit_sign_up().await;
            debug!(?outcome, "Sign-up submitted");
        }
        FormAction::FollowLink => app.show_sign_in(),
        FormAction::None => {}
    }
}

async fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') => app.sign_out().await,
        KeyCode::Char('q') | KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use gobarber_core::auth::{TOKEN_KEY, USER_KEY};
    use gobarber_core::forms::{FIELD_EMAIL, FIELD_PASSWORD};
    use gobarber_core::MemoryStore;

    use super::*;
    use crate::app::tests::{restored_app, StubApi};
    use crate::app::Alert;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, press(KeyCode::Char(c))).await.expect("input");
        }
    }

    #[tokio::test]
    async fn test_typing_and_submitting_sign_in() {
        let api = Arc::new(StubApi::new(true));
        let mut app = restored_app(api.clone(), Arc::new(MemoryStore::new())).await;

        type_text(&mut app, "jane@example.com").await;
        handle_input(&mut app, press(KeyCode::Tab)).await.expect("input");
        type_text(&mut app, "secret").await;
        assert_eq!(
            app.sign_in_form.field(FIELD_EMAIL).map(|f| f.value()),
            Some("jane@example.com")
        );

        // Enter on the last field sends the form
        handle_input(&mut app, press(KeyCode::Enter)).await.expect("input");

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.route(), Route::Authenticated);
    }

    #[tokio::test]
    async fn test_password_is_typed_not_shortcut() {
        let mut app = restored_app(Arc::new(StubApi::new(true)), Arc::new(MemoryStore::new())).await;
        app.sign_in_form.focus_field(FIELD_PASSWORD);

        let quit = handle_input(&mut app, press(KeyCode::Char('q'))).await.expect("input");

        assert!(!quit);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(
            app.sign_in_form.field(FIELD_PASSWORD).map(|f| f.value()),
            Some("q")
        );
    }

    #[tokio::test]
    async fn test_link_switches_between_screens() {
        let mut app = restored_app(Arc::new(StubApi::new(true)), Arc::new(MemoryStore::new())).await;

        // Email, password, submit, link
        for _ in 0..3 {
            handle_input(&mut app, press(KeyCode::Tab)).await.expect("input");
        }
        handle_input(&mut app, press(KeyCode::Enter)).await.expect("input");
        assert_eq!(app.auth_screen, AuthScreen::SignUp);

        handle_input(&mut app, press(KeyCode::Esc)).await.expect("input");
        assert_eq!(app.auth_screen, AuthScreen::SignIn);
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_alert_swallows_keys_until_dismissed() {
        let api = Arc::new(StubApi::new(false));
        let mut app = restored_app(api.clone(), Arc::new(MemoryStore::new())).await;
        app.alert = Some(Alert::new("Authentication error", "try again"));

        handle_input(&mut app, press(KeyCode::Char('x'))).await.expect("input");
        assert!(app.alert.is_some());
        assert_eq!(
            app.sign_in_form.field(FIELD_EMAIL).map(|f| f.value()),
            Some("")
        );

        handle_input(&mut app, press(KeyCode::Enter)).await.expect("input");
        assert!(app.alert.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let mut app = restored_app(Arc::new(StubApi::new(true)), Arc::new(MemoryStore::new())).await;

        handle_input(&mut app, press(KeyCode::Esc)).await.expect("input");
        assert_eq!(app.state, AppState::ConfirmingQuit);

        let quit = handle_input(&mut app, press(KeyCode::Char('n'))).await.expect("input");
        assert!(!quit);
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, press(KeyCode::Esc)).await.expect("input");
        let quit = handle_input(&mut app, press(KeyCode::Char('y'))).await.expect("input");
        assert!(quit);
        assert_eq!(app.state, AppState::Quitting);
    }

    #[tokio::test]
    async fn test_dashboard_sign_out_key() {
        let storage = Arc::new(MemoryStore::with_entries(&[
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"id":"u1"}"#),
        ]));
        let mut app = restored_app(Arc::new(StubApi::new(true)), storage).await;
        assert_eq!(app.route(), Route::Authenticated);

        handle_input(&mut app, press(KeyCode::Char('o'))).await.expect("input");

        assert_eq!(app.route(), Route::Unauthenticated);
        assert_eq!(app.auth_screen, AuthScreen::SignIn);
    }
}
