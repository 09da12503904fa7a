//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CREDENTIAL_PATH: &str = ".wayfarer/credentials.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("API URL must start with http:// or https://: {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_prefix: String,
    pub timeouts: Timeouts,
    pub credential_path: PathBuf,
}

impl ClientConfig {
    /// Build a config pointing at `api_url` with every other value defaulted.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            timeouts: Timeouts::default(),
            credential_path: PathBuf::from(DEFAULT_CREDENTIAL_PATH),
        }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `WAYFARER_API_URL`: default `http://localhost:8000`
    /// - `WAYFARER_API_PREFIX`: default `/api/v1`
    /// - `WAYFARER_REQUEST_TIMEOUT_SECS`: default 30
    /// - `WAYFARER_CONNECT_TIMEOUT_SECS`: default 10
    /// - `WAYFARER_CREDENTIAL_PATH`: default `.wayfarer/credentials.json`
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not an integer or the URL has no
    /// http(s) scheme.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("WAYFARER_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let api_prefix = normalize_prefix(lookup("WAYFARER_API_PREFIX").as_deref().unwrap_or(DEFAULT_API_PREFIX));
        let timeouts = Timeouts {
            request_secs: parse_u64(&lookup, "WAYFARER_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "WAYFARER_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let credential_path =
            PathBuf::from(lookup("WAYFARER_CREDENTIAL_PATH").unwrap_or_else(|| DEFAULT_CREDENTIAL_PATH.to_owned()));

        Ok(Self { api_url, api_prefix, timeouts, credential_path })
    }

    /// Absolute URL for an API path such as `/auth/me`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.api_url, self.api_prefix, path)
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
