//! The authenticated session credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential representing a logged-in state: token plus reported expiry.
///
/// At most one live session exists per process. A session counts as
/// authenticated only while its token is non-empty. The expiry is recorded
/// when the token is issued but never enforced locally; the service rejects
/// stale tokens on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Token returned by the signin endpoint.
    pub token: String,
    /// Expiry reported alongside the token.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session from a token and its reported expiry.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Whether the token is non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Whether the recorded expiry has passed. Diagnostic only; nothing in
    /// the client invalidates a session based on this.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
