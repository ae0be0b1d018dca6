//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream content API
    pub upstream_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding the persistent cache
    pub cache_dir: PathBuf,
    /// Interval between cache sweeps, in seconds
    pub sweep_interval_secs: u64,
    /// Upstream fetch timeout, in seconds
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_BASE_URL` - Upstream content API (default: http://localhost:8080)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_DIR` - Persistent cache directory (default: ./cache-data)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 21600)
    /// - `FETCH_TIMEOUT_SECS` - Upstream timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./cache-data")),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(21_600),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Upstream fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: "http://localhost:8080".to_string(),
            server_port: 3000,
            cache_dir: PathBuf::from("./cache-data"),
            sweep_interval_secs: 21_600,
            fetch_timeout_secs: 10,
        }
    }
}
