//! Server settings loaded via OrthoConfig.
//!
//! Values come from `STUDENTS_*` environment variables, CLI flags or a config
//! file. The record store is chosen from which connection settings are
//! present:
//!
//! - `database_url` selects the Diesel adapter;
//! - `postgrest_url` selects the PostgREST adapter;
//! - neither selects the in-memory store.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Request timeout for the PostgREST client when none is configured.
pub const DEFAULT_POSTGREST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr { value: String },
    #[error("invalid PostgREST URL `{value}`")]
    InvalidPostgrestUrl { value: String },
    #[error("configure either database_url or postgrest_url, not both")]
    ConflictingStores,
}

/// Record store chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSelection {
    Memory,
    Postgres(PoolConfig),
    Postgrest {
        base_url: Url,
        api_key: Option<String>,
        timeout: Duration,
    },
}

/// Configuration values for the HTTP server and its record store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Base URL of a PostgREST endpoint exposing the `students` table.
    pub postgrest_url: Option<String>,
    /// Key sent as `apikey` and bearer token to PostgREST.
    pub postgrest_api_key: Option<String>,
    pub postgrest_timeout_secs: Option<u64>,
    pub pool_max_size: Option<u32>,
    pub pool_min_idle: Option<u32>,
    pub pool_timeout_secs: Option<u64>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl ServerSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = present(Some(&self.bind_addr)).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool settings for `database_url`, with defaults for unset limits.
    fn pool_config(&self, database_url: &str) -> PoolConfig {
        let timeout = self
            .pool_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
            .with_connection_timeout(timeout)
    }

    /// Decide which record store to build.
    pub fn store(&self) -> Result<StoreSelection, SettingsError> {
        match (
            present(self.database_url.as_ref()),
            present(self.postgrest_url.as_ref()),
        ) {
            (Some(_), Some(_)) => Err(SettingsError::ConflictingStores),
            (Some(database_url), None) => Ok(StoreSelection::Postgres(self.pool_config(database_url))),
            (None, Some(raw)) => {
                let base_url = Url::parse(raw).map_err(|_| SettingsError::InvalidPostgrestUrl {
                    value: raw.to_owned(),
                })?;
                Ok(StoreSelection::Postgrest {
                    base_url,
                    api_key: present(self.postgrest_api_key.as_ref()).map(str::to_owned),
                    timeout: self
                        .postgrest_timeout_secs
                        .map_or(DEFAULT_POSTGREST_TIMEOUT, Duration::from_secs),
                })
            }
            (None, None) => Ok(StoreSelection::Memory),
        }
    }
}
