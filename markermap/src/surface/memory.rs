//! Headless [`MapSurface`] implementation.

use std::collections::BTreeMap;

use crate::coord::GeoPoint;

use super::types::{
    Icon, MapSurface, MarkerHandle, OverlayHandle, PolygonStyle, PopupHandle,
};

/// Recorded state of one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub position: GeoPoint,
    pub icon: Icon,
    pub visible: bool,
    pub gestures_bound: bool,
}

/// Recorded state of one popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub html: String,
    /// Marker the popup is currently open on.
    pub open_on: Option<MarkerHandle>,
}

/// Recorded state of one polygon overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub points: Vec<GeoPoint>,
    pub style: PolygonStyle,
    pub attached: bool,
}

/// Surface that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    next_id: u64,
    markers: BTreeMap<MarkerHandle, MarkerState>,
    popups: BTreeMap<PopupHandle, PopupState>,
    overlays: BTreeMap<OverlayHandle, OverlayState>,
    view: Option<(GeoPoint, u8)>,
    removed_markers: usize,
    removed_popups: usize,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&MarkerState> {
        self.markers.get(&handle)
    }

    pub fn popup(&self, handle: PopupHandle) -> Option<&PopupState> {
        self.popups.get(&handle)
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&OverlayState> {
        self.overlays.get(&handle)
    }

    /// Number of live markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of live popups.
    pub fn popup_count(&self) -> usize {
        self.popups.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Live markers currently shown.
    pub fn visible_markers(&self) -> Vec<MarkerHandle> {
        self.markers
            .iter()
            .filter(|(_, m)| m.visible)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Popups currently open.
    pub fn open_popups(&self) -> Vec<PopupHandle> {
        self.popups
            .iter()
            .filter(|(_, p)| p.open_on.is_some())
            .map(|(h, _)| *h)
            .collect()
    }

    /// Overlays currently attached.
    pub fn attached_overlays(&self) -> Vec<OverlayHandle> {
        self.overlays
            .iter()
            .filter(|(_, o)| o.attached)
            .map(|(h, _)| *h)
            .collect()
    }

    /// Last `(center, zoom)` passed to [`MapSurface::focus`].
    pub fn view(&self) -> Option<(GeoPoint, u8)> {
        self.view
    }

    /// How many markers have been disposed of so far.
    pub fn removed_markers(&self) -> usize {
        self.removed_markers
    }

    pub fn removed_popups(&self) -> usize {
        self.removed_popups
    }
}

impl MapSurface for InMemorySurface {
    fn create_marker(&mut self, position: GeoPoint, icon: Icon) -> MarkerHandle {
        let handle = MarkerHandle(self.allocate());
        self.markers.insert(
            handle,
            MarkerState {
                position,
                icon,
                visible: true,
                gestures_bound: false,
            },
        );
        handle
    }

    fn set_visible(&mut self, marker: MarkerHandle, visible: bool) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.visible = visible;
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_some() {
            self.removed_markers += 1;
        }
        for popup in self.popups.values_mut() {
            if popup.open_on == Some(marker) {
                popup.open_on = None;
            }
        }
    }

    fn create_info_window(&mut self, html: &str) -> PopupHandle {
        let handle = PopupHandle(self.allocate());
        self.popups.insert(
            handle,
            PopupState {
                html: html.to_string(),
                open_on: None,
            },
        );
        handle
    }

    fn open_info_window(&mut self, popup: PopupHandle, anchor: MarkerHandle) {
        if !self.markers.contains_key(&anchor) {
            return;
        }
        if let Some(state) = self.popups.get_mut(&popup) {
            state.open_on = Some(anchor);
        }
    }

    fn close_info_window(&mut self, popup: PopupHandle) {
        if let Some(state) = self.popups.get_mut(&popup) {
            state.open_on = None;
        }
    }

    fn remove_info_window(&mut self, popup: PopupHandle) {
        if self.popups.remove(&popup).is_some() {
            self.removed_popups += 1;
        }
    }

    fn bind_gestures(&mut self, marker: MarkerHandle) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.gestures_bound = true;
        }
    }

    fn focus(&mut self, center: GeoPoint, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn create_polygon(&mut self, points: &[GeoPoint], style: &PolygonStyle) -> OverlayHandle {
        let handle = OverlayHandle(self.allocate());
        self.overlays.insert(
            handle,
            OverlayState {
                points: points.to_vec(),
                style: style.clone(),
                attached: false,
            },
        );
        handle
    }

    fn set_overlay_visible(&mut self, overlay: OverlayHandle, visible: bool) {
        if let Some(state) = self.overlays.get_mut(&overlay) {
            state.attached = visible;
        }
    }
}
