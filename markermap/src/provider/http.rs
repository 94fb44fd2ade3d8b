//! HTTP provider backed by `reqwest`.

use std::time::Duration;

use super::types::{DataProvider, ProviderError, RawRecord};
use crate::entity::Category;

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`HttpDataProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    base_url: String,
    timeout: Duration,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Endpoint for a category, e.g. `http://host/api/teams/`.
    pub fn endpoint(&self, category: Category) -> String {
        format!(
            "{}/api/{}/",
            self.base_url.trim_end_matches('/'),
            category.api_segment()
        )
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Fetches region data from the backend's JSON API.
///
/// Uses a single `reqwest::Client` for connection pooling.
#[derive(Debug, Clone)]
pub struct HttpDataProvider {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl HttpDataProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Query pairs for one fetch.
fn query_pairs<'a>(region: &'a str, season: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
    let mut pairs = vec![("region", region)];
    if let Some(season) = season {
        pairs.push(("season", season));
    }
    pairs
}

impl DataProvider for HttpDataProvider {
    async fn fetch(
        &self,
        category: Category,
        region: &str,
        season: Option<&str>,
    ) -> Result<Vec<RawRecord>, ProviderError> {
        let url = self.config.endpoint(category);

        let response = self
            .http
            .get(&url)
            .query(&query_pairs(region, season))
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))?;

        let records: Vec<RawRecord> =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Json(e.to_string()))?;

        tracing::debug!(
            category = %category,
            region,
            records = records.len(),
            "Region fetched"
        );

        Ok(records)
    }
}
