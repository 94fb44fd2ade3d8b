//! Configuration file support.
//!
//! Settings are read from an INI file (default `~/.markermap/config.ini`).
//! A missing file yields defaults; a present file overlays them key by key.
//!
//! ```ini
//! [provider]
//! base_url = https://fms.example.org
//! season = 2024
//! regions = NH, VT, ME
//!
//! [placement]
//! max_rings = 10
//! ```
//!
//! [`ConfigFile`] converts into the runtime structs the other modules take:
//! [`ProviderConfig`](crate::provider::ProviderConfig),
//! [`ResolverConfig`](crate::dedup::ResolverConfig),
//! [`PollerConfig`](crate::loader::PollerConfig) and
//! [`SessionConfig`](crate::session::SessionConfig).

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use defaults::{
    DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE, DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_MS, MAX_ZOOM,
};
pub use settings::{ConfigFile, LoaderSettings, LoggingSettings, PlacementSettings, ProviderSettings};
