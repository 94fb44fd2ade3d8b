use std::collections::HashMap;

use crate::coord::GeoPoint;
use crate::surface::{MapSurface, MarkerGesture, MarkerHandle, PopupHandle};

/// Zoom level applied when a marker is double-clicked.
pub const DEFAULT_FOCUS_ZOOM: u8 = 12;

/// What a gesture did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// A popup opened and none was open before.
    Opened(PopupHandle),
    /// The open popup was closed (its marker was clicked again).
    Closed(PopupHandle),
    /// The open popup closed and another one opened.
    Switched { closed: PopupHandle, opened: PopupHandle },
    /// The view was recentred.
    Focused { center: GeoPoint, zoom: u8 },
    /// The marker is not registered.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    popup: PopupHandle,
    position: GeoPoint,
}

/// Tracks which popup belongs to which marker and which one is open.
#[derive(Debug)]
pub struct InfoWindowController {
    bindings: HashMap<MarkerHandle, Binding>,
    current: Option<(MarkerHandle, PopupHandle)>,
    focus_zoom: u8,
}

impl InfoWindowController {
    pub fn new(focus_zoom: u8) -> Self {
        Self {
            bindings: HashMap::new(),
            current: None,
            focus_zoom,
        }
    }

    pub fn focus_zoom(&self) -> u8 {
        self.focus_zoom
    }

    /// Binds `popup` to `marker`. `position` is where double-click recentres.
    pub fn register(&mut self, marker: MarkerHandle, popup: PopupHandle, position: GeoPoint) {
        self.bindings.insert(marker, Binding { popup, position });
    }

    /// Forgets a marker. Returns `true` if its popup was the open one, in
    /// which case the caller should close it on the surface.
    pub fn unregister(&mut self, marker: MarkerHandle) -> bool {
        self.bindings.remove(&marker);
        if self.current.is_some_and(|(m, _)| m == marker) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn is_registered(&self, marker: MarkerHandle) -> bool {
        self.bindings.contains_key(&marker)
    }

    pub fn registered_count(&self) -> usize {
        self.bindings.len()
    }

    /// The open popup, if any.
    pub fn current(&self) -> Option<PopupHandle> {
        self.current.map(|(_, popup)| popup)
    }

    /// Toggle or switch the open popup.
    pub fn on_click<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        marker: MarkerHandle,
    ) -> GestureOutcome {
        let Some(binding) = self.bindings.get(&marker).copied() else {
            return GestureOutcome::Ignored;
        };

        match self.current.take() {
            Some((open_marker, open_popup)) if open_marker == marker => {
                surface.close_info_window(open_popup);
                GestureOutcome::Closed(open_popup)
            }
            Some((_, open_popup)) => {
                surface.close_info_window(open_popup);
                surface.open_info_window(binding.popup, marker);
                self.current = Some((marker, binding.popup));
                GestureOutcome::Switched {
                    closed: open_popup,
                    opened: binding.popup,
                }
            }
            None => {
                surface.open_info_window(binding.popup, marker);
                self.current = Some((marker, binding.popup));
                GestureOutcome::Opened(binding.popup)
            }
        }
    }

    /// Recentre on the marker. Leaves popups alone.
    pub fn on_double_click<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        marker: MarkerHandle,
    ) -> GestureOutcome {
        let Some(binding) = self.bindings.get(&marker) else {
            return GestureOutcome::Ignored;
        };
        surface.focus(binding.position, self.focus_zoom);
        GestureOutcome::Focused {
            center: binding.position,
            zoom: self.focus_zoom,
        }
    }

    pub fn handle<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        gesture: MarkerGesture,
    ) -> GestureOutcome {
        match gesture {
            MarkerGesture::Click(marker) => self.on_click(surface, marker),
            MarkerGesture::DoubleClick(marker) => self.on_double_click(surface, marker),
        }
    }

    /// Drops every binding. Does not touch the surface.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.current = None;
    }
}

impl Default for InfoWindowController {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_ZOOM)
    }
}
