//! Shopkeeper CLI - admin client for the shop service.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and persist the session
//! shopkeeper login -u admin@example.com
//!
//! # List the product catalog
//! shopkeeper products
//!
//! # Inspect a single product
//! shopkeeper show -MMJwew2DCqeDCDw
//!
//! # Session housekeeping
//! shopkeeper status
//! shopkeeper logout
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPKEEPER_API_BASE` / `SHOPKEEPER_API_PATH` - service location
//! - `SHOPKEEPER_USERNAME` / `SHOPKEEPER_PASSWORD` - login fallbacks
//! - `SHOPKEEPER_STATE_DIR` - session state directory override

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "shopkeeper")]
#[command(author, version, about = "Shopkeeper admin client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account username (email); falls back to `SHOPKEEPER_USERNAME`
        #[arg(short, long)]
        username: Option<String>,

        /// Account password; falls back to `SHOPKEEPER_PASSWORD`
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List the product catalog
    Products,
    /// Show details for a single product
    Show {
        /// Product id as issued by the service (ids may start with `-`)
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Show the persisted session status
    Status,
    /// Drop the persisted session
    Logout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { username, password } => commands::login::run(username, password).await?,
        Commands::Products => commands::products::list().await?,
        Commands::Show { id } => commands::products::show(&id).await?,
        Commands::Status => commands::session::status()?,
        Commands::Logout => commands::session::logout()?,
    }
    Ok(())
}
