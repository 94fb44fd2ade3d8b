//! The per-category store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::entity::{Category, Entity, EntityId};

/// A store shared between a loader task and the session.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Region-sequential load progress of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load started this session.
    Idle,
    /// Waiting on, or merging, the response for `region_index`.
    Loading { region_index: usize },
    /// Every region merged.
    Complete,
}

/// Entities of one category.
#[derive(Debug)]
pub struct EntityStore {
    category: Category,
    entities: HashMap<EntityId, Entity>,
    programs: Vec<(String, Vec<EntityId>)>,
    attributes: Vec<String>,
    attribute_set: HashSet<String>,
    state: LoadState,
    mapped: bool,
}

impl EntityStore {
    /// Creates an empty store with the category's program catalogue seeded
    /// so index order follows the catalogue.
    pub fn new(category: Category) -> Self {
        let programs = category
            .program_types()
            .iter()
            .map(|p| (p.to_string(), Vec::new()))
            .collect();
        Self {
            category,
            entities: HashMap::new(),
            programs,
            attributes: Vec::new(),
            attribute_set: HashSet::new(),
            state: LoadState::Idle,
            mapped: false,
        }
    }

    /// Wraps a fresh store for sharing.
    pub fn shared(category: Category) -> SharedStore {
        Arc::new(RwLock::new(Self::new(category)))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Inserts an entity, or refreshes the existing record with the same id.
    ///
    /// Returns `true` when the id was new. A refresh keeps the record's
    /// position in the program index and any marker it already owns; if the
    /// program tag changed the id moves to the new program's list.
    pub fn upsert(&mut self, entity: Entity) -> bool {
        let id = entity.id().clone();
        let program = entity.program().to_string();

        if let Some(existing) = self.entities.get_mut(&id) {
            let previous_program = existing.program().to_string();
            existing.refresh(program.clone(), entity.attributes().clone());
            if previous_program != program {
                self.unindex(&previous_program, &id);
                self.index(&program, id);
            }
            return false;
        }

        self.index(&program, id.clone());
        self.entities.insert(id, entity);
        true
    }

    fn index(&mut self, program: &str, id: EntityId) {
        match self.programs.iter_mut().find(|(p, _)| p == program) {
            Some((_, ids)) => ids.push(id),
            None => self.programs.push((program.to_string(), vec![id])),
        }
    }

    fn unindex(&mut self, program: &str, id: &EntityId) {
        if let Some((_, ids)) = self.programs.iter_mut().find(|(p, _)| p == program) {
            ids.retain(|i| i != id);
        }
    }

    /// Records attribute keys, keeping first-observation order.
    pub fn observe_attributes<'a>(&mut self, keys: impl IntoIterator<Item = &'a String>) {
        for key in keys {
            if self.attribute_set.insert(key.clone()) {
                self.attributes.push(key.clone());
            }
        }
    }

    /// Attribute keys seen across every loaded record, de-duplicated, in the
    /// order they were first observed.
    pub fn attributes_observed(&self) -> &[String] {
        &self.attributes
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Program tags in index order: catalogue first, then any unknown tags
    /// in the order they were first loaded.
    pub fn program_types(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(|(p, _)| p.as_str())
    }

    /// Ids of one program type in load order. Unknown programs are empty.
    pub fn program_ids(&self, program: &str) -> &[EntityId] {
        self.programs
            .iter()
            .find(|(p, _)| p == program)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Every id, program by program, each in load order.
    pub fn ordered_ids(&self) -> Vec<EntityId> {
        self.programs
            .iter()
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }

    /// Ids for `program`, or for every program when `None`.
    pub fn ids_for(&self, program: Option<&str>) -> Vec<EntityId> {
        match program {
            Some(p) => self.program_ids(p).to_vec(),
            None => self.ordered_ids(),
        }
    }

    /// Entities in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The "fully loaded" flag.
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Complete
    }

    /// `Idle → Loading(0)`. Returns `false` if a load already started.
    pub fn begin_loading(&mut self) -> bool {
        if self.state != LoadState::Idle {
            return false;
        }
        self.state = LoadState::Loading { region_index: 0 };
        true
    }

    /// `Loading(n) → Loading(n + 1)`.
    pub fn advance_region(&mut self) {
        if let LoadState::Loading { region_index } = self.state {
            self.state = LoadState::Loading {
                region_index: region_index + 1,
            };
        }
    }

    /// `Loading(_) → Complete`. Returns `true` only on the transition itself.
    pub fn complete_loading(&mut self) -> bool {
        if !matches!(self.state, LoadState::Loading { .. }) {
            return false;
        }
        self.state = LoadState::Complete;
        true
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    /// Sets the "mapped" flag. Returns `true` only the first time.
    pub fn mark_mapped(&mut self) -> bool {
        !std::mem::replace(&mut self.mapped, true)
    }

    /// Number of entities currently owning a marker.
    pub fn placed_count(&self) -> usize {
        self.entities.values().filter(|e| e.is_placed()).count()
    }
}
