//! Application configuration loaded from environment variables

use std::env;

use crate::error::ConfigError;

/// Configuration for the Mini App client
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend REST API
    pub api_base: String,
    /// Base URL for uploaded-file links (screenshots, product images)
    pub media_base: String,
    /// Support-contact URL opened in an external browser tab
    pub support_url: String,
    /// Enable the verbose debug console (off in production by default)
    pub debug_console: bool,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// How long to wait for the Telegram bridge to become ready, in seconds
    pub bridge_ready_timeout_secs: u64,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BASE_URL`: Base URL of the backend REST API (required)
    /// - `MEDIA_BASE_URL`: Base URL for uploaded-file links (default: `{API_BASE_URL}/upload`)
    /// - `SUPPORT_URL`: Support-contact link (default: `https://t.me/buyback_support`)
    /// - `DEBUG_CONSOLE`: Enable verbose logging, `true`/`1` (default: off)
    /// - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
    /// - `BRIDGE_READY_TIMEOUT_SECS`: Telegram bridge readiness timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = env::var("API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("API_BASE_URL"))?
            .trim_end_matches('/')
            .to_string();

        let media_base = env::var("MEDIA_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("{}/upload", api_base));

        let support_url = env::var("SUPPORT_URL")
            .unwrap_or_else(|_| "https://t.me/buyback_support".to_string());

        let debug_console = env::var("DEBUG_CONSOLE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let bridge_ready_timeout_secs = env::var("BRIDGE_READY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(AppConfig {
            api_base,
            media_base,
            support_url,
            debug_console,
            request_timeout_secs,
            bridge_ready_timeout_secs,
        })
    }

    /// Resolve an uploaded-file path to a full URL.
    ///
    /// Absolute `http(s)` paths are passed through unchanged; everything else
    /// is joined onto the media base.
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}/{}", self.media_base, path.trim_start_matches('/'))
        }
    }
}
