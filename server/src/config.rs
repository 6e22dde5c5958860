//! Startup configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loaded once in `main` before anything binds. A missing or malformed
//! provider URL is fatal: the process exits with the error instead of serving
//! pages that cannot authenticate.

use reqwest::Url;

pub const AUTH_BASE_URL_VAR: &str = "AUTH_BASE_URL";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("{var} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be {expected}, got {value:?}")]
    Invalid { var: &'static str, expected: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identity provider base URL, without a trailing slash.
    pub auth_base_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub auth_request_timeout_secs: u64,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `AUTH_BASE_URL`: identity provider base URL
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let raw_url = get(AUTH_BASE_URL_VAR).ok_or(ConfigError::Missing(AUTH_BASE_URL_VAR))?;
        let auth_base_url = parse_base_url(&raw_url)?;

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", expected: "a port number", value: raw })?,
            None => DEFAULT_PORT,
        };
        let auth_request_timeout_secs = match get("AUTH_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or(ConfigError::Invalid {
                var: "AUTH_REQUEST_TIMEOUT_SECS",
                expected: "a positive number of seconds",
                value: raw,
            })?,
            None => DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self { auth_base_url, bind_addr, port, auth_request_timeout_secs })
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidUrl { var: AUTH_BASE_URL_VAR, value: raw.to_owned() };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
