//! Shopkeeper Core - Shared types library.
//!
//! This crate provides the domain types used across the Shopkeeper
//! components:
//! - `client` - Session lifecycle and catalog synchronization
//! - `cli` - Command-line admin client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product snapshots, type-safe IDs, and the session credential

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
