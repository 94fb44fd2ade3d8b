//! Fixed-interval readiness polling.

use std::time::Duration;

use thiserror::Error;

use crate::store::SharedStore;

/// Default re-check interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// The poll budget ran out before the condition held.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("{what} still not ready after {attempts} retries")]
    Exhausted { what: String, attempts: u32 },
}

/// Interval and optional retry budget for [`ReadinessPoller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    interval: Duration,
    max_attempts: Option<u32>,
}

impl PollerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Caps the number of retries. `None` polls until the condition holds.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
        }
    }
}

/// Waits for a flag by re-checking it on a fixed interval.
///
/// This is a loop, not a self-rescheduling callback: one pending sleep at a
/// time and a retry count the caller can observe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessPoller {
    config: PollerConfig,
}

impl ReadinessPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Resolves once `ready()` returns true, with the number of retries it
    /// took (0 if it was ready immediately).
    pub async fn wait_for<F>(&self, what: &str, ready: F) -> Result<u32, PollError>
    where
        F: Fn() -> bool,
    {
        let mut retries: u32 = 0;
        loop {
            if ready() {
                if retries > 0 {
                    tracing::debug!(what, retries, "Ready after polling");
                }
                return Ok(retries);
            }
            if self.config.max_attempts.is_some_and(|max| retries >= max) {
                tracing::warn!(what, retries, "Poll budget exhausted");
                return Err(PollError::Exhausted {
                    what: what.to_string(),
                    attempts: retries,
                });
            }
            tracing::trace!(what, retries, "Not ready, retrying");
            tokio::time::sleep(self.config.interval).await;
            retries = retries.saturating_add(1);
        }
    }

    /// Waits for a store's "fully loaded" flag.
    pub async fn wait_until_loaded(&self, store: &SharedStore) -> Result<u32, PollError> {
        let what = store.read().category().label();
        self.wait_for(what, || store.read().is_loaded()).await
    }
}
