//! Remote catalog client abstraction.
//!
//! Provides typed access to the catalog's resource families. Each
//! operation performs exactly one network round trip with a fixed timeout;
//! there is no retry and no caching at this layer. Callers own caching
//! decisions.

mod client;

pub use client::CatalogClient;

use crate::Result;
use crate::models::{EvolutionNode, RecordDetail, RecordSummary, SpeciesInfo};
use async_trait::async_trait;
use std::time::Duration;

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    /// Record references on this page, in catalog order.
    pub results: Vec<RecordSummary>,
    /// Whether the remote signals a further page.
    pub has_more: bool,
}

/// Trait for remote catalog sources.
///
/// The production implementation is [`CatalogClient`]; tests substitute
/// scripted sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one page of record references.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    async fn list_records(&self, limit: usize, offset: usize) -> Result<ListPage>;

    /// Fetches full detail for one record by numeric id or name.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    async fn get_detail(&self, id_or_name: &str) -> Result<RecordDetail>;

    /// Fetches species metadata for one record by numeric id or name.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    async fn get_species(&self, id_or_name: &str) -> Result<SpeciesInfo>;

    /// Fetches a raw evolution chain by its absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    async fn get_evolution_chain(&self, url: &str) -> Result<EvolutionNode>;

    /// Fetches the record references belonging to one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    async fn get_by_type(&self, type_name: &str) -> Result<Vec<RecordSummary>>;
}

/// HTTP client configuration for catalog requests.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl HttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("DEXCORE_HTTP_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("DEXCORE_HTTP_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds an HTTP client for catalog requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build catalog HTTP client: {err}");
        reqwest::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.connect_timeout_ms, 3_000);
    }
}
