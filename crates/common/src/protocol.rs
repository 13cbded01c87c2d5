//! Request and response types exchanged between the API and its client.
//!
//! All bodies are JSON with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Acknowledgment messages
// ---------------------------------------------------------------------------

/// `msg` returned by `POST /users`.
pub const MSG_USER_CREATED: &str = "Usuario creado correctamente";
/// `msg` returned by `PATCH /users/:id`.
pub const MSG_USER_UPDATED: &str = "Usuario actualizado correctamente";
/// `msg` returned by `DELETE /users/:id`.
pub const MSG_USER_DELETED: &str = "Usuario eliminado correctamente";

// ---------------------------------------------------------------------------
// User records
// ---------------------------------------------------------------------------

/// Request body for `POST /users` and `PATCH /users/:id`.
///
/// Both fields are optional on the wire so that the server can answer a
/// missing field with its own 400 instead of a deserialisation rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserPayload {
    /// Construct a payload with both fields set.
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            password: Some(password.into()),
        }
    }

    /// Returns both fields when each is present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let user_name = self.user_name.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((user_name, password))
    }
}

/// A user record as returned by `GET /users` (ciphertext fields) and
/// `GET /users/:id` (plaintext fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub user_name: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Success acknowledgment for mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the record store answered a ping.
    pub database: bool,
}
