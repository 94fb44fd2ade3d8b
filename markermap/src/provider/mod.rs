//! Backend data provider abstraction
//!
//! Entities arrive one region at a time from a backend API. This module
//! defines the [`DataProvider`] contract the loader consumes, the
//! [`RawRecord`] response shape, and two implementations:
//!
//! - [`HttpDataProvider`]: `GET {base_url}/api/{category}/?region=..&season=..`
//! - [`ScriptedProvider`]: canned responses with a call log, for tests and
//!   offline runs
//!
//! ```ignore
//! use markermap::provider::{HttpDataProvider, ProviderConfig};
//!
//! let provider = HttpDataProvider::new(ProviderConfig::new("https://fms.example.org"))?;
//! let records = provider.fetch(Category::Team, "NH", Some("2024")).await?;
//! ```

mod http;
mod scripted;
mod types;

pub use http::{HttpDataProvider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use scripted::{FetchCall, ScriptedProvider};
pub use types::{DataProvider, ProviderError, RawRecord};
