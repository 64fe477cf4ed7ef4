//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email/password pair posted to `/auth/signup` and `/auth/login`
#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `/auth/login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token
    pub access_token: String,

    /// Token scheme, always `bearer` in practice
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Account returned by `/auth/signup` and `/auth/validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a successful `/auth/validate` call.
///
/// Backends answer either with the account the token belongs to or with a
/// bare `{"valid": bool}` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenStatus {
    Account(UserAccount),
    Flag { valid: bool },
}

impl TokenStatus {
    /// Whether the backend vouched for the token
    pub fn is_valid(&self) -> bool {
        match self {
            TokenStatus::Account(_) => true,
            TokenStatus::Flag { valid } => *valid,
        }
    }
}

/// Generic `{"message": ...}` acknowledgement, e.g. from `/auth/logout`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
