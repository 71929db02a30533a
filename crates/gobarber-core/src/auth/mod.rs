//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: restore / sign in / sign out, broadcast to subscribers
//! - `Session`, `UserRecord`, `AuthState`: the session data model
//! - `Credentials`, `Registration`: transient form input, never persisted
//!
//! The session is persisted as two storage keys: the token and the
//! JSON-serialized user record.

pub mod session;
pub mod store;

pub use session::{AuthState, Credentials, Registration, Session, UserRecord};
pub use store::{SessionError, SessionStore, TOKEN_KEY, USER_KEY};
