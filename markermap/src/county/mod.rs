//! County overlays.
//!
//! Counties are not markers. Each county record carries a `geometry` string
//! of whitespace-separated `lng,lat` pairs that becomes a filled polygon.
//! Overlays are built once, after the county store is fully loaded, and are
//! afterwards only attached to or detached from the map.

mod overlay;

pub use overlay::{overlay_style, parse_geometry, CountyOverlays, OVERLAY_COLORS};
