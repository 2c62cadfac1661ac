//! Data models
//!
//! Shared between storefront-server and its API clients.

pub mod product;

// Re-exports
pub use product::*;
