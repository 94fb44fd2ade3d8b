use std::sync::Arc;

use crate::coord::GeoPoint;
use crate::log::{Logger, NoOpLogger};
use crate::store::EntityStore;
use crate::surface::{MapSurface, OverlayHandle, PolygonStyle};
use crate::{log_debug, log_info};

/// Palette cycled by county index.
pub const OVERLAY_COLORS: [&str; 8] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#00FFFF", "#FF00FF", "#FF7F00", "#7F00FF",
];

/// Style of the `index`-th county.
pub fn overlay_style(index: usize) -> PolygonStyle {
    let color = OVERLAY_COLORS[index % OVERLAY_COLORS.len()];
    PolygonStyle {
        stroke_color: color.to_string(),
        stroke_opacity: 0.0,
        stroke_weight: 2,
        fill_color: color.to_string(),
        fill_opacity: 0.35,
    }
}

/// Parses `"lng,lat lng,lat ..."`. Malformed pairs are dropped.
pub fn parse_geometry(geometry: &str) -> Vec<GeoPoint> {
    geometry
        .split_whitespace()
        .filter_map(|pair| {
            let (lng, lat) = pair.split_once(',')?;
            let lng: f64 = lng.trim().parse().ok()?;
            let lat: f64 = lat.trim().parse().ok()?;
            GeoPoint::checked(lat, lng).ok()
        })
        .collect()
}

#[derive(Debug, Clone)]
struct CountyOverlay {
    name: String,
    handle: OverlayHandle,
}

/// The built county polygons, in load order.
pub struct CountyOverlays {
    overlays: Vec<CountyOverlay>,
    built: bool,
    logger: Arc<dyn Logger>,
}

impl CountyOverlays {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            overlays: Vec::new(),
            built: false,
            logger,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn handle(&self, name: &str) -> Option<OverlayHandle> {
        self.overlays
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.handle)
    }

    /// Builds one detached polygon per county. Does nothing if already built
    /// or if the store is not fully loaded; returns whether it built.
    pub fn build<S: MapSurface + ?Sized>(&mut self, store: &mut EntityStore, surface: &mut S) -> bool {
        if self.built || !store.is_loaded() {
            return false;
        }

        for (index, id) in store.ordered_ids().iter().enumerate() {
            let Some(county) = store.get(id) else {
                continue;
            };
            let points = parse_geometry(&county.attr_or_empty("geometry"));
            if points.is_empty() {
                log_debug!(self.logger, "County {} has no usable geometry", id);
            }
            let handle = surface.create_polygon(&points, &overlay_style(index));
            self.overlays.push(CountyOverlay {
                name: county.attr_str("name").unwrap_or_else(|| id.to_string()),
                handle,
            });
        }

        self.built = true;
        store.mark_mapped();
        log_info!(self.logger, "Built {} county overlays", self.overlays.len());
        true
    }

    /// Attaches (`show`) or detaches the named county, or every county when
    /// `name` is `None`. Returns how many overlays were touched.
    pub fn show<S: MapSurface + ?Sized>(&self, name: Option<&str>, show: bool, surface: &mut S) -> usize {
        match name {
            None => {
                for overlay in &self.overlays {
                    surface.set_overlay_visible(overlay.handle, show);
                }
                self.overlays.len()
            }
            Some(name) => match self.handle(name) {
                Some(handle) => {
                    surface.set_overlay_visible(handle, show);
                    1
                }
                None => 0,
            },
        }
    }

    /// Forgets the overlays, detaching them first.
    pub fn clear<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        for overlay in self.overlays.drain(..) {
            surface.set_overlay_visible(overlay.handle, false);
        }
        self.built = false;
    }
}

impl Default for CountyOverlays {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLogger))
    }
}
