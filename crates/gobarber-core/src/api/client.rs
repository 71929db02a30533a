//! API client for communicating with the GoBarber REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{Credentials, Registration};

use super::{ApiError, AuthApi};

// ============================================================================
// Constants
// ============================================================================

/// Path of the session endpoint, relative to the base URL
const SESSIONS_PATH: &str = "sessions";

/// Path of the registration endpoint, relative to the base URL
const USERS_PATH: &str = "users";

/// Successful `POST sessions` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: serde_json::Value,
}

/// API client for the booking service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `timeout` is applied to every request when set; without it a request
    /// waits for as long as the server keeps the connection open.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, "POST");

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed to send");
            ApiError::NetworkError(e)
        })?;

        Self::check_response(response).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn create_session(&self, credentials: &Credentials) -> Result<SessionResponse, ApiError> {
        let response = self.post(SESSIONS_PATH, credentials).await?;
        response
            .json::<SessionResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse session response: {}", e)))
    }

    async fn create_user(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post(USERS_PATH, registration).await?;
        Ok(())
    }
}
