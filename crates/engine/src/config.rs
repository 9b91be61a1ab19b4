//! Engine configuration.

use std::time::Duration;

use anyhow::Result;

/// Tunables for the adapter layer.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Outbound HTTP call timeout.
    pub http_timeout: Duration,

    /// Bound on document-store FIND result size.
    pub find_limit: usize,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let http_timeout_secs: u64 = std::env::var("TESTDECK_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let find_limit: usize = std::env::var("TESTDECK_FIND_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            http_timeout: Duration::from_secs(http_timeout_secs),
            find_limit,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(30),
            find_limit: 10,
        }
    }
}
