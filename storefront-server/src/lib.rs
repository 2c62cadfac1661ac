//! Storefront catalog API
//!
//! Products live in a Google Sheets document; product images are hosted on
//! Cloudinary. The HTTP surface is a small axum router:
//!
//! - `GET /` greeting
//! - `GET /products` list
//! - `POST /products` create (multipart, image upload)
//! - `PUT /products/{id}`, `DELETE /products/{id}` acknowledged no-ops
//! - `GET /health`

pub mod api;
pub mod core;
pub mod media;
pub mod middleware;
pub mod routes;
pub mod sheets;
pub mod utils;

pub use crate::core::{AppState, Config, Server, ServerError};
pub use routes::{build_app, build_router};
