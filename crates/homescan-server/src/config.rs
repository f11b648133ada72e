use std::time::Duration;

use homescan_client::DEFAULT_BASE_URL;
use homescan_core::AppError;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub model_name: String,
    pub model_api_key: String,
    pub model_base_url: String,
    pub auth_token: String,
    pub port: u16,
    pub fetch_timeout: Duration,
    pub model_timeout: Duration,
    pub allow_private_urls: bool,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `MODEL_NAME`, `MODEL_API_KEY`, `AUTHORIZATION_TOKEN` (required)
    /// - `MODEL_BASE_URL` (optional, defaults to Gemini's OpenAI-compatible API)
    /// - `PORT` (optional, defaults to 8000)
    /// - `FETCH_TIMEOUT_SECS` (optional, defaults to 10)
    /// - `MODEL_TIMEOUT_SECS` (optional, defaults to 120)
    /// - `ALLOW_PRIVATE_URLS` (optional, defaults to false)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{key} must be set")))
        };

        Ok(Self {
            model_name: required("MODEL_NAME")?,
            model_api_key: required("MODEL_API_KEY")?,
            auth_token: required("AUTHORIZATION_TOKEN")?,
            model_base_url: lookup("MODEL_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
            model_timeout: Duration::from_secs(parse_or(&lookup, "MODEL_TIMEOUT_SECS", 120)?),
            allow_private_urls: parse_or(&lookup, "ALLOW_PRIVATE_URLS", false)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("Invalid {key} '{raw}'"))),
    }
}
