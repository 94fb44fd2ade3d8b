//! Marker placement.
//!
//! Once a category is fully loaded, [`PlacementEngine::place_all`] walks its
//! entities in program order and, for each eligible one:
//!
//! 1. resolves its coordinate through the session's [`GeoResolver`]
//! 2. creates a marker with the category icon, hidden
//! 3. creates the info popup from the category's description template
//! 4. binds click/double-click and registers the pair with the
//!    [`InfoWindowController`]
//! 5. stores marker and popup on the entity, disposing any previous pair
//!
//! Nothing in a pass is fatal. Missing coordinates and exhausted ring
//! searches are logged and reported as [`PlacementIssue`]s.
//!
//! [`GeoResolver`]: crate::dedup::GeoResolver
//! [`InfoWindowController`]: crate::popup::InfoWindowController

mod engine;
mod profile;

pub use engine::{
    dispose_slot, PlacementEngine, PlacementError, PlacementIssue, PlacementReport,
};
pub use profile::{
    profile_for, ClasspackProfile, CteProfile, MarkerProfile, SchoolProfile, TeamProfile,
    UnitProfile,
};
