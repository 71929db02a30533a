//! Core library for the GoBarber terminal client.
//!
//! This crate holds everything that is not terminal rendering:
//!
//! - `storage`: device-local key-value persistence
//! - `api`: HTTP client for the booking service
//! - `auth`: the session store (restore, sign in, sign out)
//! - `forms`: field validation schemas for the sign-in and sign-up forms
//! - `config`: application configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod storage;

pub use api::{ApiClient, ApiError, AuthApi};
pub use auth::{
    AuthState, Credentials, Registration, Session, SessionError, SessionStore, UserRecord,
};
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
