// src/config.rs
use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the upstream career services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from the environment, falling back to local
    /// development defaults.
    pub fn load() -> Result<Self> {
        let base_url =
            std::env::var("ROLESCOUT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_seconds = match std::env::var("ROLESCOUT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("ROLESCOUT_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        info!("Career service API: {}", base_url);

        Ok(Self {
            base_url,
            timeout_seconds,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}
