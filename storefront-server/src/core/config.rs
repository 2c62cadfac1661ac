//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | ENVIRONMENT | development | development / staging / production |
//! | HTTP_HOST | 0.0.0.0 | Bind address |
//! | HTTP_PORT | 5000 | HTTP port |
//! | GOOGLE_CREDENTIALS_PATH | credentials.json | Service-account key file |
//! | SPREADSHEET_NAME | db-tienda | Spreadsheet document title |
//! | SHEET_SKIP_HEADER | true | Drop the first row when listing |
//! | GOOGLE_SHEETS_API_BASE | https://sheets.googleapis.com/v4/spreadsheets | Sheets API root |
//! | GOOGLE_DRIVE_API_BASE | https://www.googleapis.com/drive/v3/files | Drive files API root |
//! | CLOUDINARY_CLOUD_NAME | - | Media host account (required outside development) |
//! | CLOUDINARY_API_KEY | - | Media host key (required outside development) |
//! | CLOUDINARY_API_SECRET | - | Media host secret (required outside development) |
//! | CLOUDINARY_API_BASE | https://api.cloudinary.com/v1_1 | Media host API root |
//! | MEDIA_FOLDER | products | Upload folder on the media host |
//! | REQUEST_TIMEOUT_MS | 30000 | Outbound HTTP timeout |
//! | MAX_UPLOAD_BYTES | 10485760 | Request body limit |
//! | LOG_DIR | - | Enables daily rolling log files |
//!
//! ```ignore
//! HTTP_PORT=8080 SPREADSHEET_NAME=catalog cargo run -p storefront-server
//! ```

use std::time::Duration;

use super::error::ConfigError;

pub const DEFAULT_SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_DRIVE_API: &str = "https://www.googleapis.com/drive/v3/files";

/// Google Sheets settings
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Path to the service-account JSON key
    pub credentials_path: String,
    /// Title of the spreadsheet document
    pub spreadsheet_name: String,
    /// Whether the first row is a header to drop on reads
    pub skip_header: bool,
    /// Sheets v4 spreadsheets endpoint
    pub sheets_api_base: String,
    /// Drive v3 files endpoint
    pub drive_api_base: String,
}

/// Cloudinary settings
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// API root, `{api_base}/{cloud_name}/image/upload` is the upload endpoint
    pub api_base: String,
    /// Logical folder uploads land in
    pub folder: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    pub http_host: String,
    pub http_port: u16,
    pub sheets: SheetsConfig,
    pub media: MediaConfig,
    /// Timeout for calls to Google and Cloudinary (milliseconds)
    pub request_timeout_ms: u64,
    /// Maximum accepted request body (bytes)
    pub max_upload_bytes: usize,
    /// Directory for rolling log files, stdout only when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, ConfigError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ConfigError::Missing {
                        name: name.to_string(),
                        environment: environment.to_string(),
                    });
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ConfigError::Empty {
                name: name.to_string(),
                environment: environment.to_string(),
            });
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_parse("HTTP_PORT", 5000),
            sheets: SheetsConfig {
                credentials_path: std::env::var("GOOGLE_CREDENTIALS_PATH")
                    .unwrap_or_else(|_| "credentials.json".into()),
                spreadsheet_name: std::env::var("SPREADSHEET_NAME")
                    .unwrap_or_else(|_| "db-tienda".into()),
                skip_header: env_parse("SHEET_SKIP_HEADER", true),
                sheets_api_base: std::env::var("GOOGLE_SHEETS_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_SHEETS_API.into()),
                drive_api_base: std::env::var("GOOGLE_DRIVE_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_DRIVE_API.into()),
            },
            media: MediaConfig {
                cloud_name: Self::require_secret("CLOUDINARY_CLOUD_NAME", &environment)?,
                api_key: Self::require_secret("CLOUDINARY_API_KEY", &environment)?,
                api_secret: Self::require_secret("CLOUDINARY_API_SECRET", &environment)?,
                api_base: std::env::var("CLOUDINARY_API_BASE")
                    .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".into()),
                folder: std::env::var("MEDIA_FOLDER").unwrap_or_else(|_| "products".into()),
            },
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Parse an env var, falling back to `default` when unset or malformed
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_fallbacks() {
        assert_eq!(env_parse("STOREFRONT_TEST_UNSET_PORT", 5000u16), 5000);
        assert!(env_parse("STOREFRONT_TEST_UNSET_FLAG", true));
    }

    #[test]
    fn test_require_secret_development_placeholder() {
        let val = Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-STOREFRONT_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_missing_in_production() {
        let err = Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "production").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
        assert!(err.to_string().contains("STOREFRONT_TEST_UNSET_SECRET"));
    }

    #[test]
    fn test_bind_addr_and_timeout() {
        let config = Config {
            environment: "development".into(),
            http_host: "127.0.0.1".into(),
            http_port: 8080,
            sheets: SheetsConfig {
                credentials_path: "credentials.json".into(),
                spreadsheet_name: "db-tienda".into(),
                skip_header: true,
                sheets_api_base: DEFAULT_SHEETS_API.into(),
                drive_api_base: DEFAULT_DRIVE_API.into(),
            },
            media: MediaConfig {
                cloud_name: "demo".into(),
                api_key: "key".into(),
                api_secret: "secret".into(),
                api_base: "https://api.cloudinary.com/v1_1".into(),
                folder: "products".into(),
            },
            request_timeout_ms: 1500,
            max_upload_bytes: 1024,
            log_dir: None,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    }
}
