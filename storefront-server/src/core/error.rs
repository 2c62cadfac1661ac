use thiserror::Error;

use crate::sheets::SheetError;

/// Configuration errors raised while reading the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be set in {environment} environment")]
    Missing { name: String, environment: String },

    #[error("{name} must not be empty in {environment} environment")]
    Empty { name: String, environment: String },
}

/// Start-up and serving errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("spreadsheet client error: {0}")]
    Sheets(#[from] SheetError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
