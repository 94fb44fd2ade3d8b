//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Backend API settings
    pub provider: ProviderSettings,
    /// Marker placement settings
    pub placement: PlacementSettings,
    /// Readiness polling settings
    pub loader: LoaderSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Base URL; requests go to `{base_url}/api/{category}/`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Season sent with team and classpack requests
    pub season: Option<String>,
    /// Regions fetched, in order
    pub regions: Vec<String>,
}

/// Marker placement configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSettings {
    /// First ring offset in degrees
    pub dedup_step: f64,
    /// Rings tried before accepting an overlap
    pub max_rings: u32,
    /// Zoom level applied on double-click
    pub focus_zoom: u8,
}

/// Readiness polling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSettings {
    /// Re-check interval in milliseconds
    pub poll_interval_ms: u64,
    /// Retry budget; 0 polls forever
    pub max_polls: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory the log file is written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
