//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub bind_addr: SocketAddr,

    /// Directory for the CSV log and the latest-reading snapshot
    pub data_dir: PathBuf,

    /// Interval between SSE keep-alive comments on idle streams
    pub sse_keep_alive: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3001".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            sse_keep_alive: Duration::from_secs(15),
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Build a config from the environment
    ///
    /// Honors `BIND_ADDR` (full socket address), `PORT` (port only), and
    /// `DATA_DIR`. Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = std::env::var("BIND_ADDR").ok().and_then(|v| v.parse().ok()) {
            config.bind_addr = addr;
        } else if let Some(port) = std::env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            config.bind_addr.set_port(port);
        }

        if let Ok(dir) = std::env::var("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the SSE keep-alive interval
    pub fn sse_keep_alive(mut self, interval: Duration) -> Self {
        self.sse_keep_alive = interval;
        self
    }

    /// Path of the CSV log file
    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join("dashboard.csv")
    }

    /// Path of the latest-reading snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("data.json")
    }
}
