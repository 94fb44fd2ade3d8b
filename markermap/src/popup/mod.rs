//! Info-popup discipline and marker gestures.
//!
//! At most one popup is open on the whole map. Clicking a marker opens its
//! popup and closes whichever other popup was open; clicking the marker of
//! the open popup closes it. Double-click is a separate gesture that
//! recentres the view on the marker.

mod controller;

pub use controller::{GestureOutcome, InfoWindowController, DEFAULT_FOCUS_ZOOM};
