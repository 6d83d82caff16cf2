//! Session lifecycle: authenticate, persist, restore, clear.

use chrono::Utc;
use secrecy::SecretString;

use shopkeeper_core::Session;

use crate::api::ApiClient;
use crate::error::AuthError;
use crate::storage::{StorageError, TokenStore};

/// Storage key for the persisted session token.
///
/// Kept wire-compatible with the browser client, which stored the same
/// value in a cookie of this name.
pub const TOKEN_KEY: &str = "hexToken";

/// Login form credentials. Transient; never persisted.
///
/// Implements `Debug` manually to redact the password.
pub struct Credentials {
    /// Account name; the service uses email addresses.
    pub username: String,
    /// Account password.
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Ticket identifying one login attempt.
///
/// Attempts are totally ordered; only the newest may install its session,
/// so a slow response from a superseded attempt cannot clobber state
/// written by a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttempt(u64);

/// Owns the authentication credential and its persistence.
pub struct SessionStore {
    api: ApiClient,
    store: Box<dyn TokenStore + Send>,
    current: Option<Session>,
    attempt_seq: u64,
}

impl SessionStore {
    /// Create a session store over the given API client and token storage.
    #[must_use]
    pub fn new(api: ApiClient, store: Box<dyn TokenStore + Send>) -> Self {
        Self {
            api,
            store,
            current: None,
            attempt_seq: 0,
        }
    }

    /// Validate credentials against the remote service.
    ///
    /// Does not touch local state; installing the resulting session is the
    /// caller's decision (see [`Self::complete_login`]).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] as produced by the transport layer.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.api.signin(credentials).await
    }

    /// Start a login attempt. A newer attempt supersedes all older ones.
    pub fn begin_login(&mut self) -> LoginAttempt {
        self.attempt_seq += 1;
        LoginAttempt(self.attempt_seq)
    }

    /// Install `session` for `attempt` if it is still the newest attempt.
    ///
    /// Returns `false` when a newer attempt has started since; the caller
    /// must then discard the session without persisting it.
    pub fn complete_login(&mut self, attempt: LoginAttempt, session: Session) -> bool {
        if attempt.0 != self.attempt_seq {
            return false;
        }
        self.current = Some(session);
        true
    }

    /// Write the session token to durable storage, overwriting any prior
    /// value unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be written.
    pub fn persist(&mut self, session: &Session) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, &session.token, session.expires_at)
    }

    /// Read back the persisted session, if any, and install it.
    ///
    /// A present record is trusted as authenticated; the recorded expiry is
    /// not enforced. A stale expiry only emits a warning so operators can
    /// spot old credentials.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record exists but cannot be read.
    pub fn restore(&mut self) -> Result<Option<Session>, StorageError> {
        let Some(record) = self.store.get(TOKEN_KEY)? else {
            return Ok(None);
        };
        let session = Session::new(record.value, record.expires_at);
        if session.is_expired(Utc::now()) {
            tracing::warn!(
                expires_at = %session.expires_at,
                "restored session is past its recorded expiry"
            );
        }
        self.current = Some(session.clone());
        Ok(Some(session))
    }

    /// Drop the persisted record and the in-memory session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if an existing record cannot be removed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.current = None;
        self.store.clear(TOKEN_KEY)
    }

    /// The live session, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Token of the live session, if it counts as authenticated.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|session| session.is_authenticated())
            .map(|session| session.token.as_str())
    }

    /// Whether a session with a non-empty token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
