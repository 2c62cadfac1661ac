//! Shared application state

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::media::{Cloudinary, MediaStore};
use crate::sheets::{GoogleSheets, ProductSheet};

/// State handed to every handler
///
/// Cloning is cheap: everything lives behind `Arc`. The spreadsheet and media
/// backends are trait objects so tests can run the router against fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sheet: Arc<dyn ProductSheet>,
    pub media: Arc<dyn MediaStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Config,
        sheet: Arc<dyn ProductSheet>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sheet,
            media,
        }
    }

    /// Build the production backends from configuration
    ///
    /// Fails when the service-account key cannot be read or parsed. The
    /// spreadsheet itself is only looked up on the first request.
    pub fn initialize(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("storefront-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let sheet = GoogleSheets::new(&config.sheets, http.clone())?;
        let media = Cloudinary::new(&config.media, http);

        Ok(Self::new(config.clone(), Arc::new(sheet), Arc::new(media)))
    }
}
