//! Configuration loading from the process environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

pub const PORT_VAR: &str = "PORT";
pub const TEMPLATE_PATH_VAR: &str = "TEMPLATE_PATH";
pub const METRICS_ADDR_VAR: &str = "METRICS_ADDR";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{value}': {source}")]
    Port {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid METRICS_ADDR value '{value}': {source}")]
    MetricsAddress {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Build configuration from an arbitrary key lookup.
///
/// Empty values count as unset, so `PORT=` behaves like no `PORT` at all.
pub fn from_lookup<F>(lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut config = ServiceConfig::default();

    if let Some(value) = get(PORT_VAR) {
        config.listener.port = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::Port { value, source })?;
    }

    if let Some(value) = get(TEMPLATE_PATH_VAR) {
        config.page.template_path = PathBuf::from(value);
    }

    if let Some(value) = get(METRICS_ADDR_VAR) {
        let addr: SocketAddr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::MetricsAddress { value, source })?;
        config.observability.metrics_address = Some(addr);
    }

    Ok(config)
}
