//! Bearer credential with a fixed lifetime

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of a stored credential, counted from issuance
pub const CREDENTIAL_TTL_HOURS: i64 = 24;

/// Opaque bearer token plus the moment the client stops presenting it
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Issue a credential expiring [`CREDENTIAL_TTL_HOURS`] from now
    pub fn issue(token: impl Into<String>) -> Self {
        Self::issued_at(token, Utc::now())
    }

    pub fn issued_at(token: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now + Duration::hours(CREDENTIAL_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
