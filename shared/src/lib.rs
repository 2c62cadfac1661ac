//! Shared types for the storefront catalog
//!
//! Error types and product models used by the server and its tests.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use models::{Product, ProductColumn, ProductForm, products_from_columns};
