//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),

    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Upstream HR REST API base, without a trailing slash.
    pub api_url: String,
    pub timeouts: ProxyTimeouts,
    /// Overrides the Leptos site root when serving `/pkg`.
    pub site_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `HCIMS_API_URL`: upstream base URL, `http://` or `https://`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `HCIMS_PROXY_TIMEOUT_SECS`: default 10
    /// - `HCIMS_PROXY_CONNECT_TIMEOUT_SECS`: default 5
    /// - `HCIMS_SITE_DIR`: static site root override
    ///
    /// # Errors
    ///
    /// `Missing` when the upstream URL is unset, `Invalid` for a malformed
    /// port or URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let raw_url = std::env::var("HCIMS_API_URL").map_err(|_| ConfigError::Missing("HCIMS_API_URL"))?;
        let api_url = raw_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { key: "HCIMS_API_URL", value: raw_url });
        }

        let timeouts = ProxyTimeouts {
            request_secs: env_parse_u64("HCIMS_PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS),
            connect_secs: env_parse_u64("HCIMS_PROXY_CONNECT_TIMEOUT_SECS", DEFAULT_PROXY_CONNECT_TIMEOUT_SECS),
        };
        let site_dir = std::env::var("HCIMS_SITE_DIR").ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Ok(Self { port, api_url, timeouts, site_dir })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
