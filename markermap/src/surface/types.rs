//! Surface handle types and the [`MapSurface`] trait.

use std::fmt;

use crate::coord::GeoPoint;

/// Opaque handle to a marker created by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Opaque handle to an info popup created by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupHandle(pub u64);

/// Opaque handle to a polygon overlay created by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Marker icon, as an image path understood by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Icon(pub &'static str);

impl Icon {
    pub const GREEN_DOT: Icon = Icon("../static/images/green-dot.png");
    pub const RED_DOT: Icon = Icon("../static/images/red-dot.png");
    pub const ORANGE_DOT: Icon = Icon("../static/images/orange-dot.png");
    pub const BLUE_DOT: Icon = Icon("../static/images/blue-dot.png");
    pub const LTBLUE_DOT: Icon = Icon("../static/images/ltblue-dot.png");
    pub const PURPLE_DOT: Icon = Icon("../static/images/purple-dot.png");
    pub const PINK_DOT: Icon = Icon("../static/images/pink-dot.png");
    pub const YELLOW_DOT: Icon = Icon("../static/images/yellow-dot.png");
    /// Empty path: the surface draws its own default pin.
    pub const DEFAULT_PIN: Icon = Icon("");

    pub fn path(&self) -> &'static str {
        self.0
    }
}

/// Stroke and fill styling for a polygon overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

/// A pointer gesture on a marker, delivered back from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerGesture {
    /// Toggle the marker's info popup
    Click(MarkerHandle),
    /// Recentre and zoom the view on the marker
    DoubleClick(MarkerHandle),
}

/// Rendering capabilities consumed by the marker engine.
///
/// Implementations own the actual drawing. Handles are only meaningful to
/// the surface that created them; passing a handle that was already removed
/// must be a silent no-op.
pub trait MapSurface {
    /// Creates a marker at `position` with `icon`. New markers are visible
    /// until told otherwise.
    fn create_marker(&mut self, position: GeoPoint, icon: Icon) -> MarkerHandle;

    /// Shows or hides a marker.
    fn set_visible(&mut self, marker: MarkerHandle, visible: bool);

    /// Disposes of a marker.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Creates a closed info popup holding `html`.
    fn create_info_window(&mut self, html: &str) -> PopupHandle;

    /// Opens a popup anchored on a marker.
    fn open_info_window(&mut self, popup: PopupHandle, anchor: MarkerHandle);

    /// Closes a popup. Closing a closed popup does nothing.
    fn close_info_window(&mut self, popup: PopupHandle);

    /// Disposes of a popup.
    fn remove_info_window(&mut self, popup: PopupHandle);

    /// Starts routing click and double-click on `marker` back to the caller
    /// as [`MarkerGesture`] values.
    fn bind_gestures(&mut self, marker: MarkerHandle);

    /// Recentres the view.
    fn focus(&mut self, center: GeoPoint, zoom: u8);

    /// Creates a polygon overlay. Overlays start detached from the map.
    fn create_polygon(&mut self, points: &[GeoPoint], style: &PolygonStyle) -> OverlayHandle;

    /// Attaches (`true`) or detaches (`false`) an overlay.
    fn set_overlay_visible(&mut self, overlay: OverlayHandle, visible: bool);
}
