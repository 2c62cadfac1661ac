//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found (sheet read failures included, not 500)
            Self::NotFound | Self::ProductNotFound | Self::SheetReadFailed => {
                StatusCode::NOT_FOUND
            }

            // 500 Internal Server Error
            Self::SheetWriteFailed | Self::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::InvalidRequest | Self::RequiredField => StatusCode::BAD_REQUEST,

            // 413 Payload Too Large
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}
