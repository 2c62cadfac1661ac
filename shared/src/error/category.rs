//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 6xxx: Product errors
/// - 7xxx: Spreadsheet errors
/// - 8xxx: Media errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Product errors (6xxx)
    Product,
    /// Spreadsheet errors (7xxx)
    Sheet,
    /// Media errors (8xxx)
    Media,
}

impl ErrorCategory {
    /// Determine category from error code value, `None` outside the known ranges
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0..1000 => Some(Self::General),
            6000..7000 => Some(Self::Product),
            7000..8000 => Some(Self::Sheet),
            8000..9000 => Some(Self::Media),
            _ => None,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Product => "product",
            Self::Sheet => "sheet",
            Self::Media => "media",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound | Self::InvalidRequest | Self::RequiredField | Self::PayloadTooLarge => {
                ErrorCategory::General
            }
            Self::ProductNotFound => ErrorCategory::Product,
            Self::SheetReadFailed | Self::SheetWriteFailed => ErrorCategory::Sheet,
            Self::UploadFailed => ErrorCategory::Media,
        }
    }
}
