//! Error types for the session and catalog flows.
//!
//! Two failure channels exist and stay separate: [`AuthError`] is surfaced
//! to the user through the notifier, while [`FetchError`] only ever reaches
//! the diagnostic log and leaves the catalog as it was.

use thiserror::Error;

/// Errors that can occur during signin.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the signin attempt.
    #[error("signin rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the service response, best effort.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Signin succeeded but the response carried an empty token.
    #[error("signin response carried an empty token")]
    EmptyToken,
}

/// Errors that can occur during catalog synchronization.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the catalog request.
    #[error("catalog request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the service response, best effort.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
