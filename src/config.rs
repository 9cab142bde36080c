//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default catalog API root.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the catalog API (no trailing slash)
    pub catalog_base_url: String,
    /// Maximum number of entities kept in the entity cache
    pub entity_cache_size: usize,
    /// Maximum number of actions kept in the action cache
    pub action_cache_size: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Random entity ids are drawn from `1..=max_entity_id`
    pub max_entity_id: u32,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL` - Catalog API root (default: https://pokeapi.co/api/v2)
    /// - `ENTITY_CACHE_SIZE` - Entity cache capacity (default: 100)
    /// - `ACTION_CACHE_SIZE` - Action cache capacity (default: 200)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    /// - `MAX_ENTITY_ID` - Highest entity id to draw (default: 898)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.catalog_base_url),
            entity_cache_size: parse_var("ENTITY_CACHE_SIZE").unwrap_or(defaults.entity_cache_size),
            action_cache_size: parse_var("ACTION_CACHE_SIZE").unwrap_or(defaults.action_cache_size),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            max_entity_id: parse_var::<u32>("MAX_ENTITY_ID")
                .filter(|id| *id > 0)
                .unwrap_or(defaults.max_entity_id),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            entity_cache_size: 100,
            action_cache_size: 200,
            request_timeout_secs: 10,
            max_entity_id: 898,
            server_port: 3000,
        }
    }
}
