//! Server configuration from the environment

use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Bind address did not parse
    #[error("invalid INQUIRY_BIND_ADDR {value:?}: {reason}")]
    BindAddr {
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },
}

/// Datastore connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Base URL of the REST datastore
    pub url: String,
    /// Service key sent as `apikey` and bearer token
    pub key: String,
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Datastore; absent means accept-and-log
    pub store: Option<StoreSettings>,
}

impl ApiConfig {
    /// Read `INQUIRY_BIND_ADDR`, `INQUIRY_STORE_URL` and `INQUIRY_STORE_KEY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_addr =
            non_empty("INQUIRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::BindAddr {
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        let store = match (non_empty("INQUIRY_STORE_URL"), non_empty("INQUIRY_STORE_KEY")) {
            (Some(url), Some(key)) => Some(StoreSettings { url, key }),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!(
                    "INQUIRY_STORE_URL and INQUIRY_STORE_KEY must both be set; datastore disabled"
                );
                None
            }
            (None, None) => None,
        };

        Ok(Self { bind_addr, store })
    }
}
