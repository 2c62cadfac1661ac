//! Image hosting
//!
//! Product images are pushed to an external media host and referenced by
//! their public URL. [`Cloudinary`] is the production implementation.

mod cloudinary;

pub use cloudinary::{Cloudinary, sign_params};

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// Errors raised by the media host
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("upload response did not include a url")]
    MissingUrl,
}

/// An image received from a client, ready to upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    /// Original file name as sent by the client
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Logical folder on the media host
    pub folder: String,
}

/// Upload capability of the media host
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload an image and return its public URL
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError>;
}
