//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
///
/// Every variable has a default or is optional, so the only failure mode is
/// a value that cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// CORS origin for the local frontend.
    pub allowed_origin: String,

    // --- Primary astrology provider ---
    pub astro_api_key: Option<String>,
    pub astro_api_url: String,

    // --- Secondary astrology provider (OAuth2 client credentials) ---
    pub prokerala_client_id: Option<String>,
    pub prokerala_client_secret: Option<String>,
    pub prokerala_api_url: String,

    // --- Optional text-model assessment path ---
    pub openai_api_key: Option<String>,
    pub llm_model: String,
    pub use_llm: bool,

    /// Bound on every provider round trip; a timed-out provider falls
    /// through the chain without retries.
    pub provider_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Load Provider Credentials (as optional) ---
        let astro_api_key = std::env::var("ASTRO_API_KEY").ok().filter(|v| !v.is_empty());
        let astro_api_url = std::env::var("ASTRO_API_URL")
            .unwrap_or_else(|_| "https://api.astroapi.com/v1".to_string());

        let prokerala_client_id = std::env::var("PROKERALA_CLIENT_ID")
            .ok()
            .filter(|v| !v.is_empty());
        let prokerala_client_secret = std::env::var("PROKERALA_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.is_empty());
        let prokerala_api_url = std::env::var("PROKERALA_API_URL")
            .unwrap_or_else(|_| "https://api.prokerala.com/v2".to_string());

        // --- Load Text-Model Settings ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty());
        let llm_model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let use_llm = std::env::var("USE_LLM")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let timeout_secs = match std::env::var("PROVIDER_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("PROVIDER_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            Err(_) => 10,
        };

        Ok(Self {
            bind_address,
            log_level,
            allowed_origin,
            astro_api_key,
            astro_api_url,
            prokerala_client_id,
            prokerala_client_secret,
            prokerala_api_url,
            openai_api_key,
            llm_model,
            use_llm,
            provider_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
