//! Catalog HTTP client
//!
//! Shared reqwest client with a fixed timeout and the URL templates for the
//! entity and action endpoint families.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("creature-clash/", env!("CARGO_PKG_VERSION"));

/// HTTP access to the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogHttp {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogHttp {
    /// Creates a client rooted at `base_url`. Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.catalog_base_url.clone(), config.request_timeout())
    }

    /// `{base}/pokemon/{id}`
    pub fn entity_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    /// `{base}/move/{name}`
    pub fn action_url(&self, name: &str) -> String {
        format!("{}/move/{}", self.base_url, name)
    }

    /// True when `url` points at a resource below the catalog root.
    pub fn is_catalog_url(&self, url: &str) -> bool {
        url.strip_prefix(self.base_url.as_str())
            .is_some_and(|path| path.starts_with('/'))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // == Get JSON ==
    /// GETs `url` and decodes the body.
    ///
    /// Transport errors, timeouts and non-success statuses surface as
    /// `FetchError::Network`; a body that does not match `T` as
    /// `FetchError::Decode`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "catalog request");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::Decode(format!("GET {}: {}", url, err)))
    }
}
