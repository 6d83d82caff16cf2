//! Core types for Shopkeeper.

pub mod id;
pub mod product;
pub mod session;

pub use id::ProductId;
pub use product::Product;
pub use session::Session;
