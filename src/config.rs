// config.rs
use std::{env, time::Duration};

use tracing::{info, warn};

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the raffle backend, without a trailing slash.
    pub api_base: String,
    /// Upper bound on any single backend request. A hung draw call fails
    /// the session instead of leaving it in `Drawing` forever.
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        let api_base = env::var("RAFFLE_API_BASE").unwrap_or_else(|_| {
            info!("RAFFLE_API_BASE not set, using default: {DEFAULT_API_BASE}");
            DEFAULT_API_BASE.to_string()
        });

        let timeout_secs = env::var("RAFFLE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| {
                v.parse()
                    .map_err(|e| warn!("Invalid RAFFLE_REQUEST_TIMEOUT_SECS: {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
