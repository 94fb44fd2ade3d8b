//! Provider types and traits

use std::future::Future;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::entity::Category;

/// One element of a region response.
///
/// Most categories nest every attribute under `info`; teams also carry a
/// top-level `program` tag and counties put their fields at the top level,
/// which land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// Record with only an `info` object.
    pub fn from_info(info: Map<String, Value>) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }
}

/// Errors that can occur while fetching a region.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Backend answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not the expected JSON array.
    #[error("Failed to parse response: {0}")]
    Json(String),

    /// Failure injected or reported by a non-HTTP provider.
    #[error("Provider error: {0}")]
    Other(String),
}

/// Source of region-partitioned entity data.
///
/// One call fetches one region of one category. The loader never issues a
/// second call for a category before the first has returned.
pub trait DataProvider: Send + Sync {
    /// Fetches every record of `category` in `region`.
    ///
    /// `season` is passed only for seasonal categories (teams, classpacks).
    fn fetch(
        &self,
        category: Category,
        region: &str,
        season: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawRecord>, ProviderError>> + Send;
}
