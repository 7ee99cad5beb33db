//! Command line and environment configuration.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

use crate::domain::pagination::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(name = "ledger-api")]
#[command(version)]
#[command(about = "Users and transactions REST API with cursor pagination", long_about = None)]
pub struct Config {
    /// SQLite database URL; the file is created if missing
    #[arg(long, env = "LEDGER_DATABASE_URL", default_value = "sqlite:ledger.db")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "LEDGER_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Maximum pooled database connections
    #[arg(long, env = "LEDGER_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Page size used when a list request has no `limit`
    #[arg(long, env = "LEDGER_DEFAULT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub default_page_size: u32,

    /// Largest accepted `limit`
    #[arg(long, env = "LEDGER_MAX_PAGE_SIZE", default_value_t = MAX_PAGE_SIZE)]
    pub max_page_size: u32,

    /// Allowed CORS origin; any origin if unset
    #[arg(long, env = "LEDGER_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LEDGER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid page sizes: default {default} must be between 1 and max {max}")]
    InvalidPageSize { default: u32, max: u32 },

    #[error("max_connections must be at least 1")]
    NoConnections,

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

impl Config {
    /// Page size bounds for list endpoints
    pub fn page_limits(&self) -> Result<PageLimits, ConfigError> {
        PageLimits::new(self.default_page_size, self.max_page_size).ok_or(
            ConfigError::InvalidPageSize {
                default: self.default_page_size,
                max: self.max_page_size,
            },
        )
    }

    pub fn max_connections(&self) -> Result<u32, ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::NoConnections);
        }
        Ok(self.max_connections)
    }

    /// The configured CORS origin as a header value
    pub fn cors_origin(&self) -> Result<Option<HeaderValue>, ConfigError> {
        self.cors_origin
            .as_deref()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
            })
            .transpose()
    }
}
