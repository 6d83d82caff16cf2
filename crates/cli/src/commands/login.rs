//! Sign-in command.

use secrecy::SecretString;
use thiserror::Error;

use shopkeeper_client::{ClientConfig, Controller, Credentials};

use crate::console::ConsoleNotifier;

/// Errors that can occur before the login flow starts.
#[derive(Debug, Error)]
pub enum LoginError {
    /// No username given on the command line or in the environment.
    #[error("missing username: pass --username or set SHOPKEEPER_USERNAME")]
    MissingUsername,

    /// No password given on the command line or in the environment.
    #[error("missing password: pass --password or set SHOPKEEPER_PASSWORD")]
    MissingPassword,

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] shopkeeper_client::ConfigError),
}

/// Sign in against the shop service and persist the session.
///
/// Outcome reporting goes through the console notifier; a rejected login is
/// not a command error.
pub async fn run(username: Option<String>, password: Option<String>) -> Result<(), LoginError> {
    let config = ClientConfig::from_env()?;

    let username = username
        .or_else(|| config.username.clone())
        .ok_or(LoginError::MissingUsername)?;
    let password = password
        .map(SecretString::from)
        .or_else(|| config.password.clone())
        .ok_or(LoginError::MissingPassword)?;

    let mut controller = Controller::from_config(&config, ConsoleNotifier);
    controller
        .login(&Credentials::new(username, password))
        .await;

    if controller.is_authenticated() {
        tracing::info!(
            products = controller.catalog().len(),
            "session persisted and catalog synchronized"
        );
    }
    Ok(())
}
