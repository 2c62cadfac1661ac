//! Spreadsheet access
//!
//! Products are stored in the first worksheet of a single spreadsheet.
//! Handlers only see [`ProductSheet`]; [`GoogleSheets`] is the production
//! implementation talking to the Google Sheets and Drive REST APIs.

mod auth;
mod google;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use google::{GoogleSheets, column_letters};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by spreadsheet access
#[derive(Debug, Error)]
pub enum SheetError {
    /// No spreadsheet with the configured title is visible to the account
    #[error("spreadsheet '{0}' not found")]
    SpreadsheetNotFound(String),

    #[error("spreadsheet has no worksheets")]
    NoWorksheet,

    #[error("column index must start at 1, got {0}")]
    InvalidColumn(usize),

    #[error("invalid credentials file {path}: {reason}")]
    Credentials { path: String, reason: String },

    #[error("failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("invalid request url: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("google api returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Column reads and row appends against the product worksheet
///
/// Column indexes are 1-based, matching the spreadsheet UI.
#[async_trait]
pub trait ProductSheet: Send + Sync {
    /// All values of one column, top to bottom
    ///
    /// Blank cells between values come back as empty strings; trailing
    /// blanks are not returned.
    async fn col_values(&self, col: usize) -> Result<Vec<String>, SheetError>;

    /// Append one row after the last non-empty row
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError>;
}
