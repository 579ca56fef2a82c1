//! # API Configuration
//!
//! Environment-based configuration for the dispatch API service.

use std::env;

/// Dispatch API configuration, loaded from the environment with the
/// documented defaults applied when a variable is absent.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub api_port: u16,

    /// Base URL advertised in startup logs.
    pub base_url: String,

    /// Minutes between periodic battery-level reports.
    pub battery_report_interval_min: u64,

    /// Logging level when `RUST_LOG` is unset.
    pub log_level: String,

    /// Register a demo fleet at startup.
    pub seed_demo_fleet: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost".to_owned()),

            battery_report_interval_min: env::var("BATTERY_REPORT_INTERVAL_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&minutes| minutes > 0)
                .unwrap_or(1),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),

            seed_demo_fleet: env::var("SEED_DEMO_FLEET")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
