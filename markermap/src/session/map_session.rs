use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::coord::GeoPoint;
use crate::county::CountyOverlays;
use crate::dedup::{GeoResolver, ResolverConfig};
use crate::entity::{Category, Entity, EntityId, MarkerSlot};
use crate::loader::{LoadError, LoadOutcome, PollError, PollerConfig, ReadinessPoller, RegionLoader};
use crate::log::{Logger, NoOpLogger};
use crate::log_info;
use crate::placement::{dispose_slot, PlacementEngine, PlacementError, PlacementReport};
use crate::popup::{GestureOutcome, InfoWindowController, DEFAULT_FOCUS_ZOOM};
use crate::provider::DataProvider;
use crate::store::MapDataset;
use crate::surface::{MapSurface, MarkerGesture};
use crate::visibility::{FilterContext, VisibilityEngine, VisibilityReport};

/// Runtime tuning for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub resolver: ResolverConfig,
    pub poller: PollerConfig,
    /// Zoom applied on double-click.
    pub focus_zoom: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            poller: PollerConfig::default(),
            focus_zoom: DEFAULT_FOCUS_ZOOM,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Poll(#[from] PollError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// What [`MapSession::map_category`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingOutcome {
    Markers(PlacementReport),
    /// Counties: number of overlays built (0 if they already existed).
    Overlays(usize),
}

pub struct MapSession<P, S> {
    provider: Arc<P>,
    surface: S,
    dataset: MapDataset,
    loader: RegionLoader<P>,
    resolver: GeoResolver,
    popups: InfoWindowController,
    counties: CountyOverlays,
    filter: FilterContext,
    poller: ReadinessPoller,
    placement: PlacementEngine,
    visibility: VisibilityEngine,
    logger: Arc<dyn Logger>,
}

impl<P: DataProvider, S: MapSurface> MapSession<P, S> {
    pub fn new(provider: Arc<P>, surface: S, config: SessionConfig) -> Self {
        Self::with_logger(provider, surface, config, Arc::new(NoOpLogger))
    }

    pub fn with_logger(
        provider: Arc<P>,
        surface: S,
        config: SessionConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            loader: RegionLoader::new(Arc::clone(&provider), Vec::new(), None)
                .with_logger(Arc::clone(&logger)),
            provider,
            surface,
            dataset: MapDataset::new(),
            resolver: GeoResolver::with_logger(config.resolver, Arc::clone(&logger)),
            popups: InfoWindowController::new(config.focus_zoom),
            counties: CountyOverlays::new(Arc::clone(&logger)),
            filter: FilterContext::default(),
            poller: ReadinessPoller::new(config.poller),
            placement: PlacementEngine::new(Arc::clone(&logger)),
            visibility: VisibilityEngine::new(Arc::clone(&logger)),
            logger,
        }
    }

    /// Starts a fresh mapping pass for a region/season selection.
    ///
    /// Releases every marker, popup and county overlay of the previous pass,
    /// resets the coordinate resolver and replaces all stores. Loads still
    /// running for the previous selection finish into the discarded stores.
    pub fn begin(&mut self, regions: Vec<String>, season: Option<String>) {
        for slot in self.dataset.drain_markers() {
            dispose_slot(&mut self.surface, &mut self.popups, slot);
        }
        self.counties.clear(&mut self.surface);
        self.popups.clear();
        self.resolver.reset();
        self.dataset = MapDataset::new();

        log_info!(
            self.logger,
            "New mapping session: regions [{}], season {}",
            regions.join(", "),
            season.as_deref().unwrap_or("-")
        );
        self.loader = RegionLoader::new(Arc::clone(&self.provider), regions, season)
            .with_logger(Arc::clone(&self.logger));
    }

    /// Loads one category in place. Safe to call more than once.
    pub async fn load(&self, category: Category) -> Result<LoadOutcome, LoadError> {
        self.loader.load(self.dataset.store(category)).await
    }

    /// Waits for `category` to finish loading, then places its markers (or
    /// builds the county overlays).
    pub async fn map_category(&mut self, category: Category) -> Result<MappingOutcome, SessionError> {
        let store = Arc::clone(self.dataset.store(category));
        self.poller.wait_until_loaded(&store).await?;

        let mut guard = store.write();
        if category == Category::County {
            let built = if self.counties.build(&mut guard, &mut self.surface) {
                self.counties.len()
            } else {
                0
            };
            return Ok(MappingOutcome::Overlays(built));
        }

        let report =
            self.placement
                .place_all(&mut guard, &mut self.resolver, &mut self.surface, &mut self.popups)?;
        Ok(MappingOutcome::Markers(report))
    }

    /// Shows (`visible`) or hides the markers of a program, using the
    /// session's filter. Waits for the category to be loaded first.
    pub async fn set_visibility(
        &mut self,
        category: Category,
        program: Option<&str>,
        visible: bool,
    ) -> Result<VisibilityReport, PollError> {
        let store = Arc::clone(self.dataset.store(category));
        self.poller.wait_until_loaded(&store).await?;

        let guard = store.read();
        Ok(self
            .visibility
            .set_visibility(&guard, program, visible, &self.filter, &mut self.surface))
    }

    pub async fn hide_program(
        &mut self,
        category: Category,
        program: &str,
    ) -> Result<VisibilityReport, PollError> {
        let store = Arc::clone(self.dataset.store(category));
        self.poller.wait_until_loaded(&store).await?;

        let guard = store.read();
        Ok(self.visibility.hide_program(&guard, program, &mut self.surface))
    }

    /// Attaches or detaches one county overlay by name, or all of them.
    /// Builds the overlays first if that has not happened yet.
    pub async fn show_county(&mut self, name: Option<&str>, show: bool) -> Result<usize, PollError> {
        let store = Arc::clone(self.dataset.store(Category::County));
        self.poller.wait_until_loaded(&store).await?;

        if !self.counties.is_built() {
            self.counties.build(&mut store.write(), &mut self.surface);
        }
        Ok(self.counties.show(name, show, &mut self.surface))
    }

    /// Routes a click or double-click from the surface.
    pub fn handle_gesture(&mut self, gesture: MarkerGesture) -> GestureOutcome {
        self.popups.handle(&mut self.surface, gesture)
    }

    pub fn filter(&self) -> &FilterContext {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterContext {
        &mut self.filter
    }

    pub fn set_filter(&mut self, filter: FilterContext) {
        self.filter = filter;
    }

    /// Sets the reference point and radius for distance filtering. A radius
    /// of 0 disables it.
    pub fn set_reference(&mut self, reference: GeoPoint, radius_miles: f64) {
        self.filter.reference = Some(reference);
        self.filter.radius_miles = radius_miles;
    }

    pub fn dataset(&self) -> &MapDataset {
        &self.dataset
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn resolver(&self) -> &GeoResolver {
        &self.resolver
    }

    pub fn popups(&self) -> &InfoWindowController {
        &self.popups
    }

    pub fn counties(&self) -> &CountyOverlays {
        &self.counties
    }

    pub fn regions(&self) -> &[String] {
        self.loader.regions()
    }

    pub fn season(&self) -> Option<&str> {
        self.loader.season()
    }

    pub fn team(&self, id: &EntityId) -> Option<Entity> {
        self.dataset.team(id)
    }

    pub fn school(&self, id: &EntityId) -> Option<Entity> {
        self.dataset.school(id)
    }

    pub fn unit(&self, id: &EntityId) -> Option<Entity> {
        self.dataset.unit(id)
    }

    pub fn team_marker(&self, id: &EntityId) -> Option<MarkerSlot> {
        self.dataset.team_marker(id)
    }
}

impl<P: DataProvider + 'static, S: MapSurface> MapSession<P, S> {
    /// Spawns one loader task per category. Categories load independently;
    /// within a category regions are fetched one at a time.
    pub fn start_loading(&self) -> Vec<(Category, JoinHandle<Result<LoadOutcome, LoadError>>)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let store = Arc::clone(self.dataset.store(category));
                (category, self.loader.start(store))
            })
            .collect()
    }
}
