//! Map entities.
//!
//! An [`Entity`] is one backend record (a team, school, classpack, CTE
//! center, unit or county) plus the marker it owns once placed. Attributes
//! stay in the schemaless `info` object the backend returned; typed access
//! goes through the accessor methods, which treat absent or oddly-typed
//! fields as "not present".

mod category;
mod record;

pub use category::Category;
pub use record::{parse_geo_location, Entity, EntityId, MarkerSlot, GEO_LOCATION_KEY};
