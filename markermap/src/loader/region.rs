//! The per-category region loader.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::entity::Category;
use crate::log::{Logger, NoOpLogger};
use crate::provider::{DataProvider, ProviderError};
use crate::store::{ingest_region, IngestSummary, SharedStore};
use crate::{log_debug, log_error, log_info};

/// A region fetch failed. The category stays in `Loading(region_index)`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {category} for region {region} (index {region_index}): {source}")]
    Fetch {
        category: Category,
        region: String,
        region_index: usize,
        #[source]
        source: ProviderError,
    },
}

/// Totals for one completed category load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub category: Category,
    pub regions: usize,
    pub records: IngestSummary,
}

/// Result of a [`RegionLoader::load`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This call performed the load.
    Completed(LoadReport),
    /// A load of this store was already started earlier in the session.
    AlreadyStarted,
}

/// Loads every configured region of a category, strictly in order.
pub struct RegionLoader<P> {
    provider: Arc<P>,
    regions: Arc<[String]>,
    season: Option<String>,
    logger: Arc<dyn Logger>,
}

impl<P> Clone for RegionLoader<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            regions: Arc::clone(&self.regions),
            season: self.season.clone(),
            logger: Arc::clone(&self.logger),
        }
    }
}

impl<P: DataProvider> RegionLoader<P> {
    pub fn new(provider: Arc<P>, regions: Vec<String>, season: Option<String>) -> Self {
        Self {
            provider,
            regions: regions.into(),
            season,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }

    /// Fetches and merges every region into `store`.
    ///
    /// Only the first call per store does anything; later calls return
    /// [`LoadOutcome::AlreadyStarted`]. The season is sent only for seasonal
    /// categories. With no regions configured the store completes at once.
    pub async fn load(&self, store: &SharedStore) -> Result<LoadOutcome, LoadError> {
        let category = {
            let mut guard = store.write();
            if !guard.begin_loading() {
                return Ok(LoadOutcome::AlreadyStarted);
            }
            guard.category()
        };
        let season = if category.is_seasonal() {
            self.season.as_deref()
        } else {
            None
        };

        tracing::info!(
            category = %category,
            regions = self.regions.len(),
            season = season.unwrap_or("-"),
            "Loading category"
        );

        let mut records = IngestSummary::default();
        for (region_index, region) in self.regions.iter().enumerate() {
            let fetched = match self.provider.fetch(category, region, season).await {
                Ok(fetched) => fetched,
                Err(source) => {
                    log_error!(
                        self.logger,
                        "Loading {} stalled at region {}: {}",
                        category,
                        region,
                        source
                    );
                    tracing::warn!(
                        category = %category,
                        region = %region,
                        region_index,
                        error = %source,
                        "Region fetch failed, category load stalled"
                    );
                    return Err(LoadError::Fetch {
                        category,
                        region: region.clone(),
                        region_index,
                        source,
                    });
                }
            };

            let fetched_count = fetched.len();
            let summary = {
                let mut guard = store.write();
                let summary = ingest_region(&mut guard, region, fetched);
                guard.advance_region();
                summary
            };
            records.inserted += summary.inserted;
            records.updated += summary.updated;
            records.skipped += summary.skipped;

            log_debug!(
                self.logger,
                "Merged {} {} records from {} ({} new)",
                fetched_count,
                category,
                region,
                summary.inserted
            );
            tracing::debug!(
                category = %category,
                region = %region,
                region_index,
                records = fetched_count,
                inserted = summary.inserted,
                skipped = summary.skipped,
                "Region merged"
            );
        }

        store.write().complete_loading();
        log_info!(
            self.logger,
            "Loaded {} {} from {} regions",
            records.inserted,
            category,
            self.regions.len()
        );

        Ok(LoadOutcome::Completed(LoadReport {
            category,
            regions: self.regions.len(),
            records,
        }))
    }
}

impl<P: DataProvider + 'static> RegionLoader<P> {
    /// Runs [`load`](Self::load) as a spawned task.
    pub fn start(&self, store: SharedStore) -> JoinHandle<Result<LoadOutcome, LoadError>> {
        let loader = self.clone();
        tokio::spawn(async move { loader.load(&store).await })
    }
}
