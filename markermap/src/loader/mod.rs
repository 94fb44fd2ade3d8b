//! Region-sequential loading and readiness polling.
//!
//! A category is loaded by fetching its regions one at a time. Region `n + 1`
//! is requested only after region `n` has been merged into the store, so at
//! most one request per category is ever outstanding:
//!
//! ```text
//! Idle ──begin──► Loading(0) ──merge──► Loading(1) ──► … ──► Complete
//!                     │
//!                     └── fetch fails: stays at Loading(n) for good
//! ```
//!
//! There is no retry. A failed or hanging fetch stalls the category, and
//! anything waiting on it through a [`ReadinessPoller`] sees the stall as a
//! growing retry count or, with a poll budget, as [`PollError::Exhausted`].

mod poller;
mod region;

pub use crate::store::LoadState;
pub use poller::{PollError, PollerConfig, ReadinessPoller, DEFAULT_POLL_INTERVAL};
pub use region::{LoadError, LoadOutcome, LoadReport, RegionLoader};
