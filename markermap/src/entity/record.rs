//! Entity records and attribute access.

use std::fmt;

use serde_json::{Map, Value};

use super::Category;
use crate::coord::GeoPoint;
use crate::surface::{MarkerHandle, PopupHandle};

/// Attribute holding the `{ lat, lng }` object.
pub const GEO_LOCATION_KEY: &str = "Geo_Location";

/// Identifier of an entity, unique within its category's store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A placed marker and the popup bound to it.
///
/// Both handles live and die together; the entity holding the slot owns them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSlot {
    pub marker: MarkerHandle,
    pub popup: PopupHandle,
    /// De-conflicted position the marker was created at.
    pub position: GeoPoint,
}

/// One backend record.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    category: Category,
    program: String,
    location: Option<GeoPoint>,
    attrs: Map<String, Value>,
    slot: Option<MarkerSlot>,
}

impl Entity {
    /// Builds an entity; the location is read from [`GEO_LOCATION_KEY`].
    pub fn new(
        id: EntityId,
        category: Category,
        program: impl Into<String>,
        attrs: Map<String, Value>,
    ) -> Self {
        let location = attrs.get(GEO_LOCATION_KEY).and_then(parse_geo_location);
        Self {
            id,
            category,
            program: program.into(),
            location,
            attrs,
            slot: None,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Lower-case program-type tag.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Backend coordinate, before de-duplication.
    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        match self.attrs.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Scalar attribute rendered as text. Numbers and booleans are
    /// stringified; arrays and objects are not scalars and yield `None`.
    pub fn attr_str(&self, key: &str) -> Option<String> {
        match self.attr(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`attr_str`](Self::attr_str) but missing fields render empty.
    pub fn attr_or_empty(&self, key: &str) -> String {
        self.attr_str(key).unwrap_or_default()
    }

    /// List attribute. Arrays yield their scalar members; a plain string is
    /// treated as a comma-separated list. Missing fields yield an empty list.
    pub fn attr_list(&self, key: &str) -> Vec<String> {
        match self.attr(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Replaces the record's attributes, keeping any placed marker.
    pub fn refresh(&mut self, program: impl Into<String>, attrs: Map<String, Value>) {
        self.location = attrs.get(GEO_LOCATION_KEY).and_then(parse_geo_location);
        self.program = program.into();
        self.attrs = attrs;
    }

    pub fn marker(&self) -> Option<&MarkerSlot> {
        self.slot.as_ref()
    }

    pub fn is_placed(&self) -> bool {
        self.slot.is_some()
    }

    /// Stores a new marker slot and hands back the one it replaced, which
    /// the caller must dispose of through the surface.
    #[must_use = "a replaced marker must be removed from the surface"]
    pub fn attach_marker(&mut self, slot: MarkerSlot) -> Option<MarkerSlot> {
        self.slot.replace(slot)
    }

    /// Detaches the marker slot, if any.
    pub fn take_marker(&mut self) -> Option<MarkerSlot> {
        self.slot.take()
    }
}

/// Parses a `{ "lat": .., "lng": .. }` value.
///
/// Accepts numbers or numeric strings. Anything else, including
/// out-of-range degrees, is treated as no location.
pub fn parse_geo_location(value: &Value) -> Option<GeoPoint> {
    let obj = value.as_object()?;
    let lat = number_of(obj.get("lat")?)?;
    let lng = number_of(obj.get("lng")?)?;
    GeoPoint::checked(lat, lng).ok()
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
