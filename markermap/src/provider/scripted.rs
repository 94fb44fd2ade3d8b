//! Provider that replays canned responses.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use super::types::{DataProvider, ProviderError, RawRecord};
use crate::entity::Category;

/// One recorded `fetch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub category: Category,
    pub region: String,
    pub season: Option<String>,
}

#[derive(Debug, Clone)]
enum Script {
    Records(Vec<RawRecord>),
    Fail(String),
    Stall,
}

#[derive(Debug, Default, Clone, Copy)]
struct InFlight {
    current: usize,
    peak: usize,
}

/// Replays scripted responses per `(category, region)` and logs every call.
///
/// Regions with no script answer with an empty list. A region can be made to
/// fail, to take a while (`with_delay`, honours tokio's paused clock), or to
/// never answer at all (`with_stall`).
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    scripts: HashMap<(Category, String), Script>,
    delays: HashMap<(Category, String), Duration>,
    calls: Mutex<Vec<FetchCall>>,
    in_flight: Mutex<HashMap<Category, InFlight>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, category: Category, region: &str, records: Vec<RawRecord>) -> Self {
        self.scripts
            .insert((category, region.to_string()), Script::Records(records));
        self
    }

    pub fn with_failure(mut self, category: Category, region: &str, message: &str) -> Self {
        self.scripts.insert(
            (category, region.to_string()),
            Script::Fail(message.to_string()),
        );
        self
    }

    pub fn with_stall(mut self, category: Category, region: &str) -> Self {
        self.scripts
            .insert((category, region.to_string()), Script::Stall);
        self
    }

    pub fn with_delay(mut self, category: Category, region: &str, delay: Duration) -> Self {
        self.delays.insert((category, region.to_string()), delay);
        self
    }

    /// Every call so far, in issue order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().clone()
    }

    /// Calls for one category, in issue order.
    pub fn calls_for(&self, category: Category) -> Vec<FetchCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect()
    }

    /// Highest number of simultaneously outstanding calls seen for a category.
    pub fn peak_in_flight(&self, category: Category) -> usize {
        self.in_flight
            .lock()
            .get(&category)
            .map(|f| f.peak)
            .unwrap_or(0)
    }

    fn enter(&self, category: Category) {
        let mut in_flight = self.in_flight.lock();
        let entry = in_flight.entry(category).or_default();
        entry.current += 1;
        entry.peak = entry.peak.max(entry.current);
    }

    fn leave(&self, category: Category) {
        if let Some(entry) = self.in_flight.lock().get_mut(&category) {
            entry.current = entry.current.saturating_sub(1);
        }
    }
}

impl DataProvider for ScriptedProvider {
    async fn fetch(
        &self,
        category: Category,
        region: &str,
        season: Option<&str>,
    ) -> Result<Vec<RawRecord>, ProviderError> {
        self.calls.lock().push(FetchCall {
            category,
            region: region.to_string(),
            season: season.map(str::to_string),
        });
        self.enter(category);

        let key = (category, region.to_string());
        if let Some(delay) = self.delays.get(&key).copied() {
            tokio::time::sleep(delay).await;
        }

        let result = match self.scripts.get(&key).cloned() {
            Some(Script::Records(records)) => Ok(records),
            Some(Script::Fail(message)) => Err(ProviderError::Other(message)),
            Some(Script::Stall) => std::future::pending().await,
            None => Ok(Vec::new()),
        };

        self.leave(category);
        result
    }
}
