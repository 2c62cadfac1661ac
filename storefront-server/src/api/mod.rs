//! HTTP API
//!
//! - [`home`]: `GET /`
//! - [`products`]: product catalog CRUD
//! - [`health`]: liveness probe

pub mod health;
pub mod home;
pub mod products;

use serde::{Deserialize, Serialize};
use shared::{AppError, ErrorCode};

/// `{"message": ...}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unmatched routes
pub async fn fallback() -> AppError {
    AppError::new(ErrorCode::NotFound)
}
