//! HTTP server
//!
//! Binds the listener and serves the ingestion and subscription endpoints.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::registry::SubscriberRegistry;

/// Sensor relay server
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    /// Get a reference to the subscriber registry
    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.state.registry
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Sensor relay listening");

        axum::serve(listener, build_router(self.state)).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Sensor relay listening");

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
    }
}
