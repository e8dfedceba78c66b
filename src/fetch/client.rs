//! HTTP client for creature value pages.

use super::page;
use crate::config::ScraperConfig;
use crate::error::{Error, FetchError, Result};
use crate::market::MarketSnapshot;
use async_trait::async_trait;
use std::time::Duration;

/// Path form of a creature name: trimmed, lower-cased, whitespace runs
/// joined by single hyphens.
pub fn creature_slug(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// URL of the value page for `name`.
pub fn snapshot_url(base_url: &str, series: &str, name: &str) -> String {
    format!(
        "{}/{}-value-creatures-of-{}",
        base_url.trim_end_matches('/'),
        creature_slug(name),
        series
    )
}

/// Anything that can produce a snapshot for a creature name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current snapshot. Performs at most one network round trip.
    async fn fetch(&self, creature_name: &str) -> std::result::Result<MarketSnapshot, FetchError>;
}

/// Builder for creating a snapshot fetcher.
pub struct SnapshotFetcherBuilder {
    config: ScraperConfig,
}

impl SnapshotFetcherBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ScraperConfig::default(),
        }
    }

    /// Set the scraper configuration.
    pub fn config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the site base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> Result<SnapshotFetcher> {
        SnapshotFetcher::new(self.config)
    }
}

impl Default for SnapshotFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scrapes value pages over HTTPS.
pub struct SnapshotFetcher {
    config: ScraperConfig,
    client: reqwest::Client,
}

impl SnapshotFetcher {
    /// Create a new fetcher.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| Error::application(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// URL that a lookup of `name` will request.
    pub fn url_for(&self, name: &str) -> String {
        snapshot_url(&self.config.base_url, &self.config.series, name)
    }
}

#[async_trait]
impl SnapshotSource for SnapshotFetcher {
    async fn fetch(&self, creature_name: &str) -> std::result::Result<MarketSnapshot, FetchError> {
        if creature_slug(creature_name).is_empty() {
            return Err(FetchError::invalid_name("creature name is empty"));
        }

        let url = self.url_for(creature_name);
        tracing::debug!(%url, "Fetching value page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Value page request failed");
            return Err(FetchError::status(status.as_u16(), &url));
        }

        let body = response.text().await?;
        let snapshot = page::parse_snapshot(creature_name, &body);
        if !snapshot.has_market_data() {
            tracing::warn!(%url, "Value page has no market fields");
            return Err(FetchError::markup_missing(&url));
        }

        tracing::info!(
            creature = snapshot.creature_name(),
            value = snapshot.value_label(),
            demand = snapshot.demand_label(),
            stability = snapshot.stability_label(),
            "Fetched snapshot"
        );
        Ok(snapshot)
    }
}
