//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPKEEPER_API_BASE` - Base URL of the shop service
//! - `SHOPKEEPER_API_PATH` - Path segment identifying the shop within the service
//!
//! ## Optional
//! - `SHOPKEEPER_STATE_DIR` - Directory for persisted session state
//!   (default: platform data dir + `shopkeeper`)
//! - `SHOPKEEPER_USERNAME` - Login username fallback for the CLI
//! - `SHOPKEEPER_PASSWORD` - Login password fallback for the CLI

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the password fallback.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the shop service.
    pub api_base: Url,
    /// Path segment identifying the shop within the service.
    pub api_path: String,
    /// Directory holding persisted session state.
    pub state_dir: PathBuf,
    /// Login username fallback.
    pub username: Option<String>,
    /// Login password fallback.
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_str())
            .field("api_path", &self.api_path)
            .field("state_dir", &self.state_dir)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_raw = get_required_env("SHOPKEEPER_API_BASE")?;
        let api_base = Url::parse(&api_base_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPKEEPER_API_BASE".to_owned(), e.to_string())
        })?;
        let api_path = get_required_env("SHOPKEEPER_API_PATH")?;

        let state_dir = get_optional_env("SHOPKEEPER_STATE_DIR")
            .map_or_else(default_state_dir, PathBuf::from);
        let username = get_optional_env("SHOPKEEPER_USERNAME");
        let password = get_optional_env("SHOPKEEPER_PASSWORD").map(SecretString::from);

        Ok(Self {
            api_base,
            api_path,
            state_dir,
            username,
            password,
        })
    }
}

/// Default location for persisted session state.
fn default_state_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".shopkeeper"), |dir| dir.join("shopkeeper"))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_config() -> ClientConfig {
        ClientConfig {
            api_base: Url::parse("https://api.example.com").unwrap(),
            api_path: "teststore".to_owned(),
            state_dir: PathBuf::from("/tmp/shopkeeper-test"),
            username: Some("admin@example.com".to_owned()),
            password: Some(SecretString::from("super-secret-password")),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("SHOPKEEPER_API_BASE".to_owned());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHOPKEEPER_API_BASE"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug_output = format!("{:?}", sample_config());

        assert!(debug_output.contains("api.example.com"));
        assert!(debug_output.contains("admin@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-password"));
    }
}
