// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into a
//! [`FaucetConfig`] and handed to each component; nothing else reads the
//! environment. A `.env` file in the working directory is loaded first.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `RECORD_STORE_URL` | Claim record endpoint (GET and POST) | Required |
//! | `LAMBDA_URL` | Legacy name for `RECORD_STORE_URL` | - |
//! | `ADMIN_PRIVATE_KEY` | Admin wallet key, hex or PEM | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, net::SocketAddr};

use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const RECORD_STORE_URL_ENV: &str = "RECORD_STORE_URL";
pub const LEGACY_RECORD_STORE_URL_ENV: &str = "LAMBDA_URL";
pub const ADMIN_PRIVATE_KEY_ENV: &str = "ADMIN_PRIVATE_KEY";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// Anything other than `json` (case-insensitive) means pretty.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }
}

/// Everything the faucet needs to start.
#[derive(Clone)]
pub struct FaucetConfig {
    pub bind_addr: SocketAddr,
    pub record_store_url: Url,
    pub admin_private_key: String,
}

// The admin key must never reach the logs.
impl fmt::Debug for FaucetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaucetConfig")
            .field("bind_addr", &self.bind_addr)
            .field("record_store_url", &self.record_store_url.as_str())
            .field("admin_private_key", &"<redacted>")
            .finish()
    }
}

impl FaucetConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let (url_var, raw_url) = match get(RECORD_STORE_URL_ENV) {
            Some(url) => (RECORD_STORE_URL_ENV, url),
            None => (
                LEGACY_RECORD_STORE_URL_ENV,
                get(LEGACY_RECORD_STORE_URL_ENV).ok_or(ConfigError::Missing(RECORD_STORE_URL_ENV))?,
            ),
        };
        let record_store_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::Invalid {
            name: url_var,
            reason: e.to_string(),
        })?;
        if !matches!(record_store_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: url_var,
                reason: format!("unsupported scheme `{}`", record_store_url.scheme()),
            });
        }

        let admin_private_key =
            get(ADMIN_PRIVATE_KEY_ENV).ok_or(ConfigError::Missing(ADMIN_PRIVATE_KEY_ENV))?;

        Ok(Self {
            bind_addr,
            record_store_url,
            admin_private_key,
        })
    }
}
