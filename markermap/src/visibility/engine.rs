//! The visibility pass.

use std::sync::Arc;

use super::filter::FilterContext;
use super::predicate::{predicate_for, within_reference};
use crate::log::{Logger, NoOpLogger};
use crate::log_debug;
use crate::store::EntityStore;
use crate::surface::MapSurface;

/// Counts from one visibility pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityReport {
    pub shown: usize,
    pub hidden: usize,
    /// Targeted entities without a marker; left alone.
    pub unplaced: usize,
}

/// Re-evaluates marker visibility against a [`FilterContext`].
pub struct VisibilityEngine {
    logger: Arc<dyn Logger>,
}

impl VisibilityEngine {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Shows or hides the markers of `program` (every program when `None`).
    ///
    /// With `visible == false` every targeted marker is hidden. Otherwise a
    /// marker is shown iff the category predicate and the distance check
    /// both pass. Running the same pass twice gives the same result.
    pub fn set_visibility<S: MapSurface + ?Sized>(
        &self,
        store: &EntityStore,
        program: Option<&str>,
        visible: bool,
        ctx: &FilterContext,
        surface: &mut S,
    ) -> VisibilityReport {
        let category = store.category();
        let predicate = predicate_for(category);
        let mut report = VisibilityReport::default();

        log_debug!(
            self.logger,
            "{} Markers For {} {}",
            if visible { "Showing" } else { "Hiding" },
            program.unwrap_or("all"),
            category.label()
        );

        for id in store.ids_for(program) {
            let Some(entity) = store.get(&id) else {
                continue;
            };
            let Some(slot) = entity.marker() else {
                report.unplaced += 1;
                continue;
            };

            let show = visible
                && predicate.matches(entity, ctx)
                && within_reference(entity.location(), ctx);
            surface.set_visible(slot.marker, show);
            if show {
                report.shown += 1;
            } else {
                report.hidden += 1;
            }
        }

        report
    }

    /// Hides every marker of one program.
    pub fn hide_program<S: MapSurface + ?Sized>(
        &self,
        store: &EntityStore,
        program: &str,
        surface: &mut S,
    ) -> VisibilityReport {
        self.set_visibility(store, Some(program), false, &FilterContext::default(), surface)
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLogger))
    }
}
