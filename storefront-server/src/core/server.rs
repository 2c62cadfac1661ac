//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::core::{AppState, Config, Result};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind the listener and serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();
        let app = build_app(&state).with_state(state);

        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(
            addr = %addr,
            environment = %self.config.environment,
            "Storefront server listening"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
