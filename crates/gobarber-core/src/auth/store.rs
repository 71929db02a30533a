//! Session store: the single source of truth for "who is signed in".
//!
//! The store is built once at startup and shared by `Arc`. Its state is
//! broadcast through a `tokio::sync::watch` channel so any part of the UI
//! can read the current `AuthState` and notice when it changes.
//!
//! Every mutation writes to persistent storage first and only then updates
//! the in-memory state. A failed storage write leaves the state untouched.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi};
use crate::storage::{KeyValueStore, StorageError};

use super::{AuthState, Credentials, Registration, Session, UserRecord};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "@GoBarber:token";

/// Storage key holding the JSON-serialized user record
pub const USER_KEY: &str = "@GoBarber:user";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// True when the service rejected the credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SessionError::Remote(e) if e.is_auth_failure())
    }
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    api: Arc<dyn AuthApi>,
    state: watch::Sender<AuthState>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, api: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(AuthState::loading());
        Self { storage, api, state }
    }

    /// Receive every future state change
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user().cloned()
    }

    /// Rebuild the session from persistent storage.
    ///
    /// Runs once; later calls return the current state unchanged. A storage
    /// read failure or an unparseable user record counts as "no session".
    /// `loading` is false when this returns, whatever the outcome.
    pub async fn restore(&self) -> AuthState {
        if !self.is_loading() {
            debug!("Session already restored");
            return self.current();
        }

        let session = match self.storage.multi_get(&[TOKEN_KEY, USER_KEY]).await {
            Ok(values) => Self::session_from_storage(values),
            Err(e) => {
                warn!(error = %e, "Failed to read stored session, starting signed out");
                None
            }
        };

        info!(authenticated = session.is_some(), "Session restore complete");
        self.state.send_modify(|state| {
            state.session = session;
            state.loading = false;
        });
        self.current()
    }

    fn session_from_storage(values: Vec<Option<String>>) -> Option<Session> {
        let mut values = values.into_iter();
        let token = values.next().flatten().filter(|t| !t.is_empty())?;
        let user_json = values.next().flatten().filter(|u| !u.is_empty())?;

        match serde_json::from_str::<UserRecord>(&user_json) {
            Ok(user) if user.is_valid() => Some(Session { token, user }),
            Ok(_) => {
                warn!("Stored user record is not an object, ignoring it");
                None
            }
            Err(e) => {
                warn!(error = %e, "Stored user record is not valid JSON, ignoring it");
                None
            }
        }
    }

    /// Exchange credentials for a session, persist it, then publish it.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, SessionError> {
        let response = self.api.create_session(credentials).await.map_err(|e| {
            warn!(email = %credentials.email, error = %e, "Sign-in rejected");
            SessionError::Remote(e)
        })?;

        let user = UserRecord::new(response.user);
        if response.token.is_empty() || !user.is_valid() {
            warn!(email = %credentials.email, "Session response has no usable token or user");
            return Err(SessionError::Remote(ApiError::InvalidResponse(
                "Session response is missing the token or user".to_string(),
            )));
        }

        let user_json = user.as_value().to_string();
        self.storage
            .multi_set(&[(TOKEN_KEY, response.token.as_str()), (USER_KEY, user_json.as_str())])
            .await?;

        let session = Session {
            token: response.token,
            user,
        };
        self.state.send_modify(|state| state.session = Some(session.clone()));

        info!(email = %credentials.email, "Signed in");
        Ok(session)
    }

    /// Remove the persisted session, then clear it in memory.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.storage.multi_remove(&[TOKEN_KEY, USER_KEY]).await?;
        self.state.send_modify(|state| state.session = None);
        info!("Signed out");
        Ok(())
    }

    /// Register a new account. The current session is not touched.
    pub async fn register(&self, registration: &Registration) -> Result<(), SessionError> {
        self.api.create_user(registration).await.map_err(|e| {
            warn!(email = %registration.email, error = %e, "Registration rejected");
            SessionError::Remote(e)
        })?;
        info!(email = %registration.email, "Account registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::api::SessionResponse;
    use crate::storage::{FileStore, MemoryStore};

    /// Canned remote service that counts calls
    struct StubApi {
        session: Option<SessionResponse>,
        calls: AtomicUsize,
    }

    impl StubApi {
        fn accepting(token: &str, user: serde_json::Value) -> Self {
            Self {
                session: Some(SessionResponse {
                    token: token.to_string(),
                    user,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting() -> Self {
            Self {
                session: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthApi for StubApi {
        async fn create_session(&self, _credentials: &Credentials) -> Result<SessionResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.session.clone().ok_or(ApiError::Unauthorized)
        }

        async fn create_user(&self, _registration: &Registration) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.session {
                Some(_) => Ok(()),
                None => Err(ApiError::BadRequest("Email address already used".to_string())),
            }
        }
    }

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn multi_get(&self, _keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        async fn multi_set(&self, _entries: &[(&str, &str)]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        async fn multi_remove(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
    }

    fn store_with(storage: Arc<dyn KeyValueStore>, api: Arc<dyn AuthApi>) -> SessionStore {
        SessionStore::new(storage, api)
    }

    async fn stored(storage: &MemoryStore) -> Vec<Option<String>> {
        storage.multi_get(&[TOKEN_KEY, USER_KEY]).await.expect("get")
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let store = store_with(Arc::new(MemoryStore::new()), Arc::new(StubApi::rejecting()));
        assert!(store.is_loading());
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_restore_with_both_keys() {
        let storage = Arc::new(MemoryStore::with_entries(&[
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"id":"u1"}"#),
        ]));
        let store = store_with(storage, Arc::new(StubApi::rejecting()));

        let state = store.restore().await;

        assert!(!state.loading);
        assert_eq!(
            state.session,
            Some(Session {
                token: "t1".to_string(),
                user: UserRecord::new(json!({"id": "u1"})),
            })
        );
    }

    #[tokio::test]
    async fn test_restore_with_token_only() {
        let storage = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "t1")]));
        let store = store_with(storage, Arc::new(StubApi::rejecting()));

        let state = store.restore().await;

        assert!(!state.loading);
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_restore_with_user_only() {
        let storage = Arc::new(MemoryStore::with_entries(&[(USER_KEY, r#"{"id":"u1"}"#)]));
        let store = store_with(storage, Arc::new(StubApi::rejecting()));

        let state = store.restore().await;

        assert!(!state.loading);
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_restore_treats_empty_and_invalid_values_as_absent() {
        for (token, user) in [
            ("", r#"{"id":"u1"}"#),
            ("t1", ""),
            ("t1", "{not json"),
            ("t1", "null"),
            ("t1", r#""u1""#),
        ] {
            let storage = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, token), (USER_KEY, user)]));
            let store = store_with(storage, Arc::new(StubApi::rejecting()));

            let state = store.restore().await;

            assert!(!state.loading);
            assert!(state.session.is_none(), "token={:?} user={:?}", token, user);
        }
    }

    #[tokio::test]
    async fn test_restore_read_failure_counts_as_signed_out() {
        let store = store_with(Arc::new(BrokenStore), Arc::new(StubApi::rejecting()));

        let state = store.restore().await;

        assert!(!state.loading);
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_restore_runs_once() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(storage.clone(), Arc::new(StubApi::rejecting()));
        store.restore().await;

        storage
            .multi_set(&[(TOKEN_KEY, "late"), (USER_KEY, "{}")])
            .await
            .expect("set");
        let state = store.restore().await;

        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_persists_then_publishes() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(storage.clone(), Arc::new(StubApi::accepting("t1", json!({"id": "u1"}))));
        store.restore().await;
        let mut rx = store.subscribe();

        let session = store
            .sign_in(&Credentials::new("jane@example.com", "secret"))
            .await
            .expect("sign in");

        assert_eq!(session.token, "t1");
        assert_eq!(
            stored(&storage).await,
            vec![Some("t1".to_string()), Some(r#"{"id":"u1"}"#.to_string())]
        );
        assert!(rx.has_changed().expect("sender alive"));
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.session, Some(session));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_sign_in_rejected_leaves_state() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(storage.clone(), Arc::new(StubApi::rejecting()));
        store.restore().await;

        let err = store
            .sign_in(&Credentials::new("jane@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_auth_failure());
        assert!(store.user().is_none());
        assert_eq!(stored(&storage).await, vec![None, None]);
    }

    #[tokio::test]
    async fn test_sign_in_storage_failure_leaves_state() {
        let store = store_with(Arc::new(BrokenStore), Arc::new(StubApi::accepting("t1", json!({"id": "u1"}))));
        store.restore().await;

        let err = store
            .sign_in(&Credentials::new("jane@example.com", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!err.is_auth_failure());
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_rejects_response_without_user() {
        for user in [json!(null), json!("u1"), json!([])] {
            let storage = Arc::new(MemoryStore::new());
            let store = store_with(storage.clone(), Arc::new(StubApi::accepting("t1", user.clone())));
            store.restore().await;

            let err = store
                .sign_in(&Credentials::new("jane@example.com", "secret"))
                .await
                .unwrap_err();

            assert!(
                matches!(err, SessionError::Remote(ApiError::InvalidResponse(_))),
                "user={}",
                user
            );
            assert!(store.user().is_none());
            assert_eq!(stored(&storage).await, vec![None, None]);
        }
    }

    #[tokio::test]
    async fn test_signed_in_session_survives_restart() {
        let storage = Arc::new(MemoryStore::new());
        let api = Arc::new(StubApi::accepting("t1", json!({"id": "u1"})));
        let store = store_with(storage.clone(), api.clone());
        store.restore().await;
        let session = store
            .sign_in(&Credentials::new("jane@example.com", "secret"))
            .await
            .expect("sign in");

        let restarted = store_with(storage, api);
        let state = restarted.restore().await;

        assert_eq!(state.session, Some(session));
    }

    #[tokio::test]
    async fn test_corrupt_storage_file_does_not_block_sign_in_or_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file_store = FileStore::new(dir.path()).expect("store");
        std::fs::write(file_store.path(), "garbage").expect("write");
        let store = store_with(
            Arc::new(file_store),
            Arc::new(StubApi::accepting("t1", json!({"id": "u1"}))),
        );

        let state = store.restore().await;
        assert!(!state.loading);
        assert!(state.session.is_none());

        store
            .sign_in(&Credentials::new("jane@example.com", "secret"))
            .await
            .expect("sign in");
        assert!(store.user().is_some());

        store.sign_out().await.expect("sign out");
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_storage_and_state() {
        let storage = Arc::new(MemoryStore::with_entries(&[
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"id":"u1"}"#),
        ]));
        let store = store_with(storage.clone(), Arc::new(StubApi::rejecting()));
        assert!(store.restore().await.is_authenticated());

        store.sign_out().await.expect("sign out");

        assert!(store.user().is_none());
        assert!(!store.is_loading());
        assert_eq!(stored(&storage).await, vec![None, None]);
    }

    #[tokio::test]
    async fn test_sign_out_storage_failure_keeps_session() {
        let store = store_with(Arc::new(BrokenStore), Arc::new(StubApi::accepting("t1", json!({"id": "u1"}))));
        store.state.send_modify(|s| {
            s.loading = false;
            s.session = Some(Session {
                token: "t1".to_string(),
                user: UserRecord::new(json!({"id": "u1"})),
            });
        });

        let err = store.sign_out().await.unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert!(store.user().is_some());
    }

    #[tokio::test]
    async fn test_register_does_not_sign_in() {
        let api = Arc::new(StubApi::accepting("t1", json!({"id": "u1"})));
        let store = store_with(Arc::new(MemoryStore::new()), api.clone());
        store.restore().await;

        store
            .register(&Registration::new("Jane", "jane@example.com", "secret1"))
            .await
            .expect("register");

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_register_failure_is_remote_error() {
        let store = store_with(Arc::new(MemoryStore::new()), Arc::new(StubApi::rejecting()));

        let err = store
            .register(&Registration::new("Jane", "jane@example.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Remote(ApiError::BadRequest(_))));
    }
}
