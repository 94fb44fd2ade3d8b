//! Map surface abstraction.
//!
//! The widget that actually draws markers is an external collaborator. The
//! placement, visibility, popup and county code only ever talk to it through
//! the [`MapSurface`] trait, using opaque handles the surface hands out.
//!
//! [`InMemorySurface`] is a headless implementation that records everything
//! it is asked to do. It backs the test suite and is usable as a dry-run
//! target.

mod memory;
mod types;

pub use memory::{InMemorySurface, MarkerState, OverlayState, PopupState};
pub use types::{Icon, MapSurface, MarkerGesture, MarkerHandle, OverlayHandle, PolygonStyle, PopupHandle};
