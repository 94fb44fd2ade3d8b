//! Occupancy table and ring search.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coord::GeoPoint;
use crate::log::{Logger, NoOpLogger};
use crate::{log_debug, log_warn};

/// Offset of the first ring, in degrees.
pub const DEFAULT_STEP_DEGREES: f64 = 0.001;

/// Rings tried before an overlap is accepted.
pub const DEFAULT_MAX_RINGS: u32 = 10;

/// Upper bound on `max_rings`. Past this the doubled step spans the globe.
pub const MAX_RINGS: u32 = 32;

/// Unit `(lat, lng)` directions of one ring, in attempt order.
pub const RING_DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (0.0, 1.0),
    (-1.0, 0.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
    (1.0, -1.0),
];

/// Tuning for [`GeoResolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    step_degrees: f64,
    max_rings: u32,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the first ring. Default: 0.001°.
    pub fn with_step_degrees(mut self, step: f64) -> Self {
        self.step_degrees = step;
        self
    }

    /// Number of rings tried before accepting an overlap. Default: 10.
    /// Clamped to [`MAX_RINGS`].
    pub fn with_max_rings(mut self, rings: u32) -> Self {
        self.max_rings = rings.min(MAX_RINGS);
        self
    }

    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    pub fn max_rings(&self) -> u32 {
        self.max_rings
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            step_degrees: DEFAULT_STEP_DEGREES,
            max_rings: DEFAULT_MAX_RINGS,
        }
    }
}

/// Where a coordinate ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The rounded coordinate was free.
    Exact(GeoPoint),
    /// Moved to a ring position. `ring` is 0-based, `attempt` is 1..=8.
    Offset {
        position: GeoPoint,
        ring: u32,
        attempt: usize,
    },
    /// Every ring position was taken; the rounded original is used anyway.
    Overlapping(GeoPoint),
    /// The entity has no coordinate.
    Unmappable,
}

impl Resolution {
    /// Position to place a marker at, if any.
    pub fn position(&self) -> Option<GeoPoint> {
        match *self {
            Resolution::Exact(p) | Resolution::Overlapping(p) => Some(p),
            Resolution::Offset { position, .. } => Some(position),
            Resolution::Unmappable => None,
        }
    }

    pub fn is_overlapping(&self) -> bool {
        matches!(self, Resolution::Overlapping(_))
    }
}

/// Session-scoped coordinate de-duplicator.
pub struct GeoResolver {
    config: ResolverConfig,
    /// Canonical key to number of markers holding it. Only accepted
    /// overlaps push a count above one.
    occupied: HashMap<String, u32>,
    exhausted: usize,
    logger: Arc<dyn Logger>,
}

impl GeoResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_logger(config, Arc::new(NoOpLogger))
    }

    pub fn with_logger(config: ResolverConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            occupied: HashMap::new(),
            exhausted: 0,
            logger,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns a coordinate distinct (to 7 decimals) from every coordinate
    /// this resolver has returned since the last reset, and claims it.
    ///
    /// Absent input yields [`Resolution::Unmappable`] and touches nothing.
    pub fn resolve(&mut self, location: Option<GeoPoint>) -> Resolution {
        let Some(location) = location else {
            return Resolution::Unmappable;
        };
        let origin = location.rounded();

        if self.claim(&origin) {
            return Resolution::Exact(origin);
        }

        let mut step = self.config.step_degrees;
        for ring in 0..self.config.max_rings {
            for (index, (d_lat, d_lng)) in RING_DIRECTIONS.iter().enumerate() {
                let shifted = origin.offset(d_lat * step, d_lng * step).rounded();
                // Ring positions past a pole or the antimeridian are skipped
                let Ok(candidate) = GeoPoint::checked(shifted.lat, shifted.lng) else {
                    continue;
                };
                if self.claim(&candidate) {
                    log_debug!(
                        self.logger,
                        "Overlap at {} moved to {} (ring {}, attempt {})",
                        origin,
                        candidate,
                        ring,
                        index + 1
                    );
                    return Resolution::Offset {
                        position: candidate,
                        ring,
                        attempt: index + 1,
                    };
                }
            }
            step += step;
        }

        *self.occupied.entry(origin.canonical_key()).or_insert(0) += 1;
        self.exhausted += 1;
        log_warn!(
            self.logger,
            "Cannot map the location {} after {} rings, allowing overlap",
            origin,
            self.config.max_rings
        );
        Resolution::Overlapping(origin)
    }

    /// Marks `point` occupied. Returns `false` if it already was.
    fn claim(&mut self, point: &GeoPoint) -> bool {
        match self.occupied.entry(point.canonical_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(1);
                true
            }
        }
    }

    /// Gives back one hold on a position returned by
    /// [`resolve`](Self::resolve), so a marker being replaced does not
    /// collide with its own old spot. Returns `false` if `point` was not held.
    pub fn release(&mut self, point: &GeoPoint) -> bool {
        let Entry::Occupied(mut held) = self.occupied.entry(point.canonical_key()) else {
            return false;
        };
        if *held.get() > 1 {
            *held.get_mut() -= 1;
        } else {
            held.remove();
        }
        true
    }

    pub fn is_occupied(&self, point: &GeoPoint) -> bool {
        self.occupied.contains_key(&point.canonical_key())
    }

    /// Number of distinct coordinates claimed.
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Resolutions that ended in an accepted overlap.
    pub fn exhausted_count(&self) -> usize {
        self.exhausted
    }

    /// Forgets every claimed coordinate. Call only when a fresh mapping pass
    /// begins.
    pub fn reset(&mut self) {
        self.occupied.clear();
        self.exhausted = 0;
    }
}

impl Default for GeoResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("config", &self.config)
            .field("occupied", &self.occupied.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}
