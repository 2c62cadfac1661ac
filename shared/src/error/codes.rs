//! Unified error codes for the storefront catalog
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Product errors
//! - 7xxx: Spreadsheet errors
//! - 8xxx: Media errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are plain u16 values so they can be logged and compared cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Request body over the configured limit
    PayloadTooLarge = 8,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,

    // ==================== 7xxx: Spreadsheet ====================
    /// Reading from the spreadsheet failed
    SheetReadFailed = 7002,
    /// Appending to the spreadsheet failed
    SheetWriteFailed = 7003,

    // ==================== 8xxx: Media ====================
    /// Image upload to the media host failed
    UploadFailed = 8001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::PayloadTooLarge => "Request body too large",

            // Product
            ErrorCode::ProductNotFound => "Product not found",

            // Spreadsheet
            ErrorCode::SheetReadFailed => "Failed to read spreadsheet",
            ErrorCode::SheetWriteFailed => "Failed to write spreadsheet",

            // Media
            ErrorCode::UploadFailed => "Image upload failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::PayloadTooLarge),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),

            // Spreadsheet
            7002 => Ok(ErrorCode::SheetReadFailed),
            7003 => Ok(ErrorCode::SheetWriteFailed),

            // Media
            8001 => Ok(ErrorCode::UploadFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
