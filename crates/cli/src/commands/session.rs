//! Session status and logout commands.

use shopkeeper_client::{ClientConfig, Controller, FileTokenStore, TOKEN_KEY, TokenStore};

use crate::console::ConsoleNotifier;

/// Report whether a persisted session exists and its recorded expiry.
#[allow(clippy::print_stdout)]
pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let store = FileTokenStore::new(config.state_dir.clone());

    match store.get(TOKEN_KEY)? {
        Some(record) => {
            let expired = record.expires_at <= chrono::Utc::now();
            println!(
                "Signed in; session expires at {}{}",
                record.expires_at,
                if expired { " (expired)" } else { "" }
            );
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Drop the persisted session.
#[allow(clippy::print_stdout)]
pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let mut controller = Controller::from_config(&config, ConsoleNotifier);
    controller.logout();
    println!("Signed out.");
    Ok(())
}
