//! Orchestration core wiring user actions to the stores.
//!
//! Two states: unauthenticated and authenticated. Startup restores a
//! persisted session and, when one is present, synchronizes the catalog
//! right away. An explicit login validates credentials, persists the
//! session, then fetches. Selecting a product is a pure local change and
//! never touches the network.
//!
//! Failure channels stay asymmetric: signin failures reach the user
//! through the notifier, catalog failures only reach the log.

use shopkeeper_core::ProductId;

use crate::api::ApiClient;
use crate::catalog::CatalogStore;
use crate::config::ClientConfig;
use crate::gate::LoadingGate;
use crate::notify::Notifier;
use crate::session::{Credentials, SessionStore};
use crate::storage::FileTokenStore;

/// Authentication state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No authenticated session is held.
    #[default]
    Unauthenticated,
    /// A session with a non-empty token is held.
    Authenticated,
}

/// Orchestrating core: session lifecycle plus catalog synchronization.
pub struct Controller<N: Notifier> {
    sessions: SessionStore,
    catalog: CatalogStore,
    gate: LoadingGate,
    notifier: N,
    state: AuthState,
}

impl<N: Notifier> Controller<N> {
    /// Create a controller over the given stores.
    #[must_use]
    pub fn new(sessions: SessionStore, catalog: CatalogStore, notifier: N) -> Self {
        Self {
            sessions,
            catalog,
            gate: LoadingGate::new(),
            notifier,
            state: AuthState::Unauthenticated,
        }
    }

    /// Build a controller from configuration with file-backed storage.
    #[must_use]
    pub fn from_config(config: &ClientConfig, notifier: N) -> Self {
        let api = ApiClient::new(config);
        let store = FileTokenStore::new(config.state_dir.clone());
        Self::new(
            SessionStore::new(api.clone(), Box::new(store)),
            CatalogStore::new(api),
            notifier,
        )
    }

    /// Resolve the initial state from persisted storage.
    ///
    /// A restored session is trusted without freshness checks; when one is
    /// present the catalog is fetched immediately with its token.
    pub async fn startup(&mut self) {
        match self.sessions.restore() {
            Ok(Some(_)) => {
                self.state = AuthState::Authenticated;
                self.refresh().await;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted session");
            }
        }
    }

    /// Validate credentials and, on success, persist the session and
    /// synchronize the catalog.
    ///
    /// The success notice signals authentication, not catalog readiness:
    /// it fires after the session is persisted and before the fetch
    /// completes. A failed attempt reports through the notifier and leaves
    /// session, storage, and catalog untouched.
    pub async fn login(&mut self, credentials: &Credentials) {
        let attempt = self.sessions.begin_login();
        let _busy = self.gate.begin();

        let session = match self.sessions.authenticate(credentials).await {
            Ok(session) => session,
            Err(err) => {
                tracing::debug!(error = %err, "signin failed");
                self.notifier.error("Login failed", &err.to_string());
                return;
            }
        };

        // A superseded attempt must not touch in-memory or persisted state.
        if !self.sessions.complete_login(attempt, session.clone()) {
            tracing::debug!("login attempt superseded, discarding result");
            return;
        }
        if let Err(err) = self.sessions.persist(&session) {
            tracing::warn!(error = %err, "failed to persist session");
        }
        self.state = AuthState::Authenticated;
        self.notifier.success("Login succeeded");
        self.refresh().await;
    }

    /// Re-synchronize the catalog from the service.
    ///
    /// Requires an authenticated session; without one this is a logged
    /// no-op. Fetch failures stay on the diagnostic channel and leave the
    /// prior catalog in place.
    pub async fn refresh(&mut self) {
        let Some(token) = self.sessions.token().map(str::to_owned) else {
            tracing::warn!("catalog refresh without an authenticated session");
            return;
        };

        let _busy = self.gate.begin();
        if let Err(err) = self.catalog.fetch_all(&token).await {
            tracing::error!(error = %err, "catalog fetch failed");
        }
    }

    /// Select a product for detail display. Local state only.
    pub fn select(&mut self, id: impl Into<ProductId>) {
        self.catalog.select(id);
    }

    /// Clear the product selection.
    pub fn clear_selection(&mut self) {
        self.catalog.clear_selection();
    }

    /// Drop the persisted and in-memory session and return to the
    /// unauthenticated state. The selection is reset with it.
    pub fn logout(&mut self) {
        if let Err(err) = self.sessions.clear() {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }
        self.catalog.clear_selection();
        self.state = AuthState::Unauthenticated;
    }

    /// Current authentication state.
    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    /// Whether an authenticated session is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    /// Shared busy flag consumed by the presentation layer.
    #[must_use]
    pub const fn gate(&self) -> &LoadingGate {
        &self.gate
    }

    /// Read access to the catalog store.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Read access to the session store.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
