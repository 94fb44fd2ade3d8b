//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::dedup::{DEFAULT_MAX_RINGS, DEFAULT_STEP_DEGREES};
use crate::popup::DEFAULT_FOCUS_ZOOM;
use crate::provider::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Default poll interval (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default poll budget (0 = unbounded).
pub const DEFAULT_MAX_POLLS: u32 = 0;

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "markermap.log";

/// Highest zoom level accepted for `focus_zoom`.
pub const MAX_ZOOM: u8 = 22;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: DEFAULT_TIMEOUT_SECS,
                season: None,
                regions: Vec::new(),
            },
            placement: PlacementSettings {
                dedup_step: DEFAULT_STEP_DEGREES,
                max_rings: DEFAULT_MAX_RINGS,
                focus_zoom: DEFAULT_FOCUS_ZOOM,
            },
            loader: LoaderSettings {
                poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
                max_polls: DEFAULT_MAX_POLLS,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
