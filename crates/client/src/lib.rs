//! Shopkeeper client core - session lifecycle and catalog synchronization.
//!
//! # Architecture
//!
//! - [`ApiClient`] is the transport layer over `reqwest`
//! - [`SessionStore`] owns the authentication credential and its persistence
//! - [`CatalogStore`] owns the in-memory product collection and selection
//! - [`LoadingGate`] is the shared busy flag consumed by the presentation layer
//! - [`Controller`] wires user actions to the stores and the [`Notifier`]
//!
//! # Control flow
//!
//! On startup the controller restores a persisted session; if one exists it
//! immediately fetches the catalog. An explicit login validates credentials,
//! persists the resulting session, then triggers the fetch. Selecting a
//! product is a pure local state change.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopkeeper_client::{ClientConfig, Controller, Credentials, TracingNotifier};
//!
//! let config = ClientConfig::from_env()?;
//! let mut controller = Controller::from_config(&config, TracingNotifier);
//!
//! controller.startup().await;
//! if !controller.is_authenticated() {
//!     controller.login(&Credentials::new("admin@example.com", "hunter2")).await;
//! }
//! for product in controller.catalog().products().values() {
//!     println!("{}", product.title);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod notify;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use catalog::{Catalog, CatalogStore};
pub use config::{ClientConfig, ConfigError};
pub use controller::{AuthState, Controller};
pub use error::{AuthError, FetchError};
pub use gate::{LoadGuard, LoadingGate};
pub use notify::{NoticeKind, Notifier, TracingNotifier};
pub use session::{Credentials, LoginAttempt, SessionStore, TOKEN_KEY};
pub use storage::{FileTokenStore, MemoryTokenStore, StorageError, StoredToken, TokenStore};
