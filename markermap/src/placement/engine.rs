//! The placement pass.

use std::sync::Arc;

use thiserror::Error;

use super::profile::profile_for;
use crate::coord::GeoPoint;
use crate::dedup::{GeoResolver, Resolution};
use crate::entity::{Category, EntityId, MarkerSlot};
use crate::log::{Logger, NoOpLogger};
use crate::popup::InfoWindowController;
use crate::store::EntityStore;
use crate::surface::MapSurface;
use crate::{log_debug, log_info, log_warn};

/// Preconditions a placement pass refuses to run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{0} data is not fully loaded")]
    NotLoaded(Category),
    #[error("{0} entities are drawn as overlays, not markers")]
    NoMarkers(Category),
}

/// A non-fatal problem with one entity.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementIssue {
    /// No usable coordinate; the entity was skipped.
    MissingCoordinate { id: EntityId },
    /// Ring search ran out; the marker overlaps another one.
    DedupExhausted { id: EntityId, position: GeoPoint },
}

/// Totals for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementReport {
    pub category: Category,
    pub placed: usize,
    /// Markers moved off an occupied coordinate.
    pub offset: usize,
    /// Previously placed markers that were disposed and replaced.
    pub replaced: usize,
    pub ineligible: usize,
    pub issues: Vec<PlacementIssue>,
}

impl PlacementReport {
    fn new(category: Category) -> Self {
        Self {
            category,
            placed: 0,
            offset: 0,
            replaced: 0,
            ineligible: 0,
            issues: Vec::new(),
        }
    }

    pub fn missing_coordinates(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, PlacementIssue::MissingCoordinate { .. }))
            .count()
    }
}

/// Releases a marker/popup pair through the surface.
pub fn dispose_slot<S: MapSurface + ?Sized>(
    surface: &mut S,
    popups: &mut InfoWindowController,
    slot: MarkerSlot,
) {
    if popups.unregister(slot.marker) {
        surface.close_info_window(slot.popup);
    }
    surface.remove_info_window(slot.popup);
    surface.remove_marker(slot.marker);
}

/// Places markers for every eligible entity of a loaded category.
pub struct PlacementEngine {
    logger: Arc<dyn Logger>,
}

impl PlacementEngine {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Runs one pass over `store`.
    ///
    /// Every created marker starts hidden; a visibility pass decides what is
    /// shown. An entity that already owns a marker has the old pair released
    /// and its position handed back to `resolver` before it is resolved
    /// again, so repeated passes leave markers where they were. The store is
    /// flagged as mapped after the first pass.
    pub fn place_all<S: MapSurface + ?Sized>(
        &self,
        store: &mut EntityStore,
        resolver: &mut GeoResolver,
        surface: &mut S,
        popups: &mut InfoWindowController,
    ) -> Result<PlacementReport, PlacementError> {
        let category = store.category();
        let profile = profile_for(category).ok_or(PlacementError::NoMarkers(category))?;
        if !store.is_loaded() {
            return Err(PlacementError::NotLoaded(category));
        }

        let mut report = PlacementReport::new(category);

        for id in store.ordered_ids() {
            let Some(entity) = store.get_mut(&id) else {
                continue;
            };
            let had_marker = match entity.take_marker() {
                Some(prior) => {
                    resolver.release(&prior.position);
                    dispose_slot(surface, popups, prior);
                    true
                }
                None => false,
            };
            if !profile.eligible(entity) {
                report.ineligible += 1;
                continue;
            }

            let resolution = resolver.resolve(entity.location());
            let position = match resolution {
                Resolution::Unmappable => {
                    log_info!(self.logger, "No Geo Location for {}", profile.label(entity));
                    report.issues.push(PlacementIssue::MissingCoordinate { id });
                    continue;
                }
                Resolution::Overlapping(position) => {
                    report.issues.push(PlacementIssue::DedupExhausted {
                        id: id.clone(),
                        position,
                    });
                    position
                }
                Resolution::Offset { position, .. } => {
                    report.offset += 1;
                    position
                }
                Resolution::Exact(position) => position,
            };

            let marker = surface.create_marker(position, profile.icon(entity));
            let popup = surface.create_info_window(&profile.describe(entity));
            surface.bind_gestures(marker);
            surface.set_visible(marker, false);
            popups.register(marker, popup, position);

            let slot = MarkerSlot {
                marker,
                popup,
                position,
            };
            if let Some(previous) = entity.attach_marker(slot) {
                dispose_slot(surface, popups, previous);
            }
            if had_marker {
                report.replaced += 1;
            }
            report.placed += 1;
        }

        if store.mark_mapped() {
            log_info!(
                self.logger,
                "{} Mapped Successfully ({} markers)",
                category.label(),
                report.placed
            );
        } else {
            log_debug!(self.logger, "{} re-mapped ({} markers)", category.label(), report.placed);
        }
        if !report.issues.is_empty() {
            let exhausted = report.issues.len() - report.missing_coordinates();
            if exhausted > 0 {
                log_warn!(
                    self.logger,
                    "{} {} markers overlap after exhausting the ring search",
                    exhausted,
                    category.label()
                );
            }
        }

        Ok(report)
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLogger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::ResolverConfig;
    use crate::entity::Entity;
    use crate::log::MemoryLogger;
    use crate::surface::{Icon, InMemorySurface};
    use serde_json::{json, Map, Value};

    fn team(number: u32, registered: &str, location: Option<(f64, f64)>) -> Entity {
        let mut attrs: Map<String, Value> = json!({
            "Program": "FRC",
            "Team_Number": number,
            "Registered": registered,
        })
        .as_object()
        .cloned()
        .unwrap();
        if let Some((lat, lng)) = location {
            attrs.insert("Geo_Location".into(), json!({ "lat": lat, "lng": lng }));
        }
        Entity::new(EntityId::new(format!("frc{}", number)), Category::Team, "frc", attrs)
    }

    fn loaded(entities: Vec<Entity>) -> EntityStore {
        let mut store = EntityStore::new(Category::Team);
        store.begin_loading();
        for e in entities {
            store.upsert(e);
        }
        store.complete_loading();
        store
    }

    struct Fixture {
        engine: PlacementEngine,
        logger: Arc<MemoryLogger>,
        resolver: GeoResolver,
        surface: InMemorySurface,
        popups: InfoWindowController,
    }

    impl Fixture {
        fn new() -> Self {
            let logger = Arc::new(MemoryLogger::new());
            Self {
                engine: PlacementEngine::new(logger.clone()),
                logger,
                resolver: GeoResolver::default(),
                surface: InMemorySurface::new(),
                popups: InfoWindowController::default(),
            }
        }

        fn place(&mut self, store: &mut EntityStore) -> Result<PlacementReport, PlacementError> {
            self.engine
                .place_all(store, &mut self.resolver, &mut self.surface, &mut self.popups)
        }
    }

    #[test]
    fn test_places_hidden_markers() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![team(1, "Yes", Some((42.0, -71.0)))]);

        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.placed, 1);
        let slot = *store.get(&EntityId::new("frc1")).unwrap().marker().unwrap();
        let marker = fx.surface.marker(slot.marker).unwrap();
        assert!(!marker.visible);
        assert!(marker.gestures_bound);
        assert_eq!(marker.icon, Icon::BLUE_DOT);
        assert!(fx.surface.popup(slot.popup).unwrap().html.contains("FRC Team 1"));
        assert!(fx.popups.is_registered(slot.marker));
        assert!(store.is_mapped());
    }

    #[test]
    fn test_not_loaded_refused() {
        let mut fx = Fixture::new();
        let mut store = EntityStore::new(Category::Team);
        assert_eq!(
            fx.place(&mut store),
            Err(PlacementError::NotLoaded(Category::Team))
        );
    }

    #[test]
    fn test_county_refused() {
        let mut fx = Fixture::new();
        let mut store = EntityStore::new(Category::County);
        assert_eq!(
            fx.place(&mut store),
            Err(PlacementError::NoMarkers(Category::County))
        );
    }

    #[test]
    fn test_colliding_teams_are_offset() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![
            team(1, "Yes", Some((42.0, -71.0))),
            team(2, "Yes", Some((42.0, -71.0))),
        ]);

        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.offset, 1);
        let a = store.get(&EntityId::new("frc1")).unwrap().marker().unwrap().position;
        let b = store.get(&EntityId::new("frc2")).unwrap().marker().unwrap().position;
        assert_eq!(a, GeoPoint::new(42.0, -71.0));
        assert_eq!(b.canonical_key(), GeoPoint::new(42.001, -71.0).canonical_key());
    }

    #[test]
    fn test_unregistered_and_unlocated_skipped() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![
            team(1, "No", Some((42.0, -71.0))),
            team(2, "Yes", None),
            team(3, "Yes", Some((43.0, -71.0))),
        ]);

        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.placed, 1);
        assert_eq!(report.ineligible, 1);
        assert_eq!(
            report.issues,
            vec![PlacementIssue::MissingCoordinate {
                id: EntityId::new("frc2")
            }]
        );
        assert!(fx.logger.contains("No Geo Location for FRC Team 2"));
        assert_eq!(fx.surface.marker_count(), 1);
    }

    #[test]
    fn test_replacement_disposes_previous_marker() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![team(1, "Yes", Some((42.0, -71.0)))]);

        fx.place(&mut store).unwrap();
        let first = *store.get(&EntityId::new("frc1")).unwrap().marker().unwrap();
        fx.popups.on_click(&mut fx.surface, first.marker);

        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.replaced, 1);
        assert_eq!(fx.surface.marker_count(), 1);
        assert_eq!(fx.surface.popup_count(), 1);
        assert!(fx.surface.marker(first.marker).is_none());
        assert!(!fx.popups.is_registered(first.marker));
        assert_eq!(fx.popups.current(), None);
        assert_eq!(fx.popups.registered_count(), 1);
    }

    #[test]
    fn test_repeated_passes_keep_positions() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![
            team(1, "Yes", Some((42.0, -71.0))),
            team(2, "Yes", Some((42.0, -71.0))),
            team(3, "Yes", Some((43.0, -71.0))),
        ]);
        let positions = |store: &EntityStore| -> Vec<GeoPoint> {
            ["frc1", "frc2", "frc3"]
                .iter()
                .map(|id| store.get(&EntityId::new(*id)).unwrap().marker().unwrap().position)
                .collect()
        };

        fx.place(&mut store).unwrap();
        let first = positions(&store);
        fx.place(&mut store).unwrap();
        let report = fx.place(&mut store).unwrap();

        assert_eq!(positions(&store), first);
        assert_eq!(report.replaced, 3);
        assert_eq!(report.offset, 1);
        assert_eq!(fx.resolver.occupied_count(), 3);
        assert_eq!(fx.surface.marker_count(), 3);
    }

    #[test]
    fn test_entity_losing_location_releases_marker() {
        let mut fx = Fixture::new();
        let mut store = loaded(vec![team(1, "Yes", Some((42.0, -71.0)))]);
        fx.place(&mut store).unwrap();

        store
            .get_mut(&EntityId::new("frc1"))
            .unwrap()
            .refresh("frc", team(1, "Yes", None).attributes().clone());
        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.placed, 0);
        assert_eq!(fx.surface.marker_count(), 0);
        assert_eq!(fx.resolver.occupied_count(), 0);
        assert!(!store.get(&EntityId::new("frc1")).unwrap().is_placed());
    }

    #[test]
    fn test_exhaustion_reported_and_placed() {
        let logger = Arc::new(MemoryLogger::new());
        let mut fx = Fixture::new();
        fx.resolver = GeoResolver::with_logger(ResolverConfig::new().with_max_rings(0), logger.clone());
        let mut store = loaded(vec![
            team(1, "Yes", Some((42.0, -71.0))),
            team(2, "Yes", Some((42.0, -71.0))),
        ]);

        let report = fx.place(&mut store).unwrap();

        assert_eq!(report.placed, 2);
        assert!(matches!(
            report.issues.as_slice(),
            [PlacementIssue::DedupExhausted { .. }]
        ));
        assert!(logger.contains("allowing overlap"));
    }
}
