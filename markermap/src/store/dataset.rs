//! All stores of one mapping session.

use crate::entity::{Category, Entity, EntityId, MarkerSlot};

use super::{EntityStore, SharedStore};

/// One shared store per category.
#[derive(Debug, Clone)]
pub struct MapDataset {
    teams: SharedStore,
    schools: SharedStore,
    classpacks: SharedStore,
    ctes: SharedStore,
    units: SharedStore,
    counties: SharedStore,
}

impl MapDataset {
    pub fn new() -> Self {
        Self {
            teams: EntityStore::shared(Category::Team),
            schools: EntityStore::shared(Category::School),
            classpacks: EntityStore::shared(Category::Classpack),
            ctes: EntityStore::shared(Category::Cte),
            units: EntityStore::shared(Category::Unit),
            counties: EntityStore::shared(Category::County),
        }
    }

    pub fn store(&self, category: Category) -> &SharedStore {
        match category {
            Category::Team => &self.teams,
            Category::School => &self.schools,
            Category::Classpack => &self.classpacks,
            Category::Cte => &self.ctes,
            Category::Unit => &self.units,
            Category::County => &self.counties,
        }
    }

    /// Snapshot of one entity. Callers should check [`is_loaded`](Self::is_loaded)
    /// before treating `None` as "does not exist".
    pub fn get(&self, category: Category, id: &EntityId) -> Option<Entity> {
        self.store(category).read().get(id).cloned()
    }

    pub fn team(&self, id: &EntityId) -> Option<Entity> {
        self.get(Category::Team, id)
    }

    pub fn school(&self, id: &EntityId) -> Option<Entity> {
        self.get(Category::School, id)
    }

    pub fn unit(&self, id: &EntityId) -> Option<Entity> {
        self.get(Category::Unit, id)
    }

    pub fn team_marker(&self, id: &EntityId) -> Option<MarkerSlot> {
        self.teams.read().get(id).and_then(|e| e.marker().copied())
    }

    pub fn is_loaded(&self, category: Category) -> bool {
        self.store(category).read().is_loaded()
    }

    pub fn is_mapped(&self, category: Category) -> bool {
        self.store(category).read().is_mapped()
    }

    pub fn count(&self, category: Category) -> usize {
        self.store(category).read().len()
    }

    pub fn attributes_observed(&self, category: Category) -> Vec<String> {
        self.store(category).read().attributes_observed().to_vec()
    }

    /// Detaches every marker slot from every entity, returning them for
    /// disposal.
    pub fn drain_markers(&self) -> Vec<MarkerSlot> {
        let mut slots = Vec::new();
        for category in Category::ALL {
            let mut store = self.store(category).write();
            slots.extend(store.iter_mut().filter_map(|e| e.take_marker()));
        }
        slots
    }
}

impl Default for MapDataset {
    fn default() -> Self {
        Self::new()
    }
}
