//! REST API client module for the GoBarber booking service.
//!
//! This module provides the `ApiClient` for the two calls the client makes:
//! creating a session from credentials and registering a new account.
//! `AuthApi` is the seam the session store talks through, so tests can
//! substitute a stub for the HTTP client.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::auth::{Credentials, Registration};

pub use client::{ApiClient, SessionResponse};
pub use error::ApiError;

/// Remote session service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST sessions`: exchange credentials for a token and user record
    async fn create_session(&self, credentials: &Credentials) -> Result<SessionResponse, ApiError>;

    /// `POST users`: register a new account
    async fn create_user(&self, registration: &Registration) -> Result<(), ApiError>;
}
