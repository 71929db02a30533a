use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque user record as returned by the booking service.
///
/// The client never depends on its shape beyond a few display helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub serde_json::Value);

impl UserRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Only a JSON object counts as a signed-in user
    pub fn is_valid(&self) -> bool {
        self.0.is_object()
    }

    /// Name to greet the user with: `name`, then `email`, then `id`
    pub fn display_name(&self) -> Option<String> {
        ["name", "email", "id"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(scalar_to_string))
            .filter(|s| !s.is_empty())
    }

    /// Top-level scalar fields as `(key, value)` pairs, in key order.
    /// Nested objects and arrays are skipped.
    pub fn fields(&self) -> Vec<(String, String)> {
        match self.0.as_object() {
            Some(map) => map
                .iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
                .collect(),
            None => Vec::new(),
        }
    }
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The authenticated identity active in this process.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

/// Snapshot broadcast to subscribers of the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// True only while the startup restore is running
    pub loading: bool,
    pub session: Option<Session>,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Sign-in input. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up input. Never persisted.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
