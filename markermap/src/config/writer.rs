//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let season = config.provider.season.as_deref().unwrap_or("");
    let regions = config.provider.regions.join(", ");

    format!(
        r#"[provider]
; Backend base URL. Region data is fetched from {{base_url}}/api/{{category}}/
base_url = {}
; Request timeout in seconds (default: 30)
timeout = {}
; Season sent with team and classpack requests (empty = none)
season = {}
; Comma-separated regions, fetched one at a time in this order
regions = {}

[placement]
; Offset of the first de-duplication ring, in degrees (default: 0.001)
; Each following ring doubles the offset
dedup_step = {}
; Rings of 8 positions tried before a marker is allowed to overlap (default: 10)
max_rings = {}
; Zoom level applied when a marker is double-clicked (default: 12)
focus_zoom = {}

[loader]
; Interval between "fully loaded" checks, in milliseconds (default: 1000)
poll_interval_ms = {}
; Checks before giving up on a stalled category (default: 0 = never give up)
max_polls = {}

[logging]
; Directory for the log file (default: logs)
directory = {}
; Log file name, cleared at session start (default: markermap.log)
file = {}
"#,
        config.provider.base_url,
        config.provider.timeout,
        season,
        regions,
        config.placement.dedup_step,
        config.placement.max_rings,
        config.placement.focus_zoom,
        config.loader.poll_interval_ms,
        config.loader.max_polls,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
