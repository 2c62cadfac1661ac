//! Core server pieces: configuration, errors, state and the listener

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, MediaConfig, SheetsConfig};
pub use error::{ConfigError, Result, ServerError};
pub use server::Server;
pub use state::AppState;
