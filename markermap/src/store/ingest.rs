//! Merging one region's response into a store.

use serde_json::{Map, Value};

use super::EntityStore;
use crate::entity::{Category, Entity, EntityId};
use crate::provider::RawRecord;

/// Derived attribute synthesised for schools.
pub(crate) const ADMIN_NAME_KEY: &str = "Admin_Name";

/// Outcome of merging one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records with a previously unseen id.
    pub inserted: usize,
    /// Records that refreshed an existing id.
    pub updated: usize,
    /// Records missing the field their id is derived from.
    pub skipped: usize,
}

impl IngestSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.skipped
    }
}

/// Merges the records of one region into `store`.
///
/// Ids are derived per category:
///
/// | category  | id                                   | program tag                |
/// |-----------|--------------------------------------|----------------------------|
/// | Team      | lower(program) + `Team_Number`       | record `program` tag       |
/// | School    | `Sch_Id`                             | lower(`Group_Id`)          |
/// | Unit      | `Unit`                               | lower(`Program`)           |
/// | Classpack | `"{region}#{position}"`              | `classpacks`               |
/// | CTE       | `"{region}#{position}"`              | `ctes`                     |
/// | County    | `name`, else `"{region}#{position}"` | `counties`                 |
///
/// Schools get an `Admin_Name` attribute (`Fname Lname`) before their keys
/// are recorded as observed attributes.
pub fn ingest_region(store: &mut EntityStore, region: &str, records: Vec<RawRecord>) -> IngestSummary {
    let category = store.category();
    let mut summary = IngestSummary::default();

    for (position, record) in records.into_iter().enumerate() {
        let Some((id, program, attrs)) = identify(category, region, position, record) else {
            summary.skipped += 1;
            continue;
        };

        store.observe_attributes(attrs.keys());
        if store.upsert(Entity::new(id, category, program, attrs)) {
            summary.inserted += 1;
        } else {
            summary.updated += 1;
        }
    }

    summary
}

fn identify(
    category: Category,
    region: &str,
    position: usize,
    record: RawRecord,
) -> Option<(EntityId, String, Map<String, Value>)> {
    let RawRecord {
        program: tag,
        info,
        extra,
    } = record;
    let mut attrs = info;

    match category {
        Category::Team => {
            let program = tag
                .or_else(|| scalar(&attrs, "Program"))?
                .to_lowercase();
            let number = scalar(&attrs, "Team_Number")?;
            Some((EntityId::new(format!("{}{}", program, number)), program, attrs))
        }
        Category::School => {
            let id = scalar(&attrs, "Sch_Id")?;
            let program = scalar(&attrs, "Group_Id")?.to_lowercase();
            let admin = format!(
                "{} {}",
                scalar(&attrs, "Fname").unwrap_or_default(),
                scalar(&attrs, "Lname").unwrap_or_default()
            );
            attrs.insert(ADMIN_NAME_KEY.to_string(), Value::String(admin));
            Some((EntityId::new(id), program, attrs))
        }
        Category::Unit => {
            let id = scalar(&attrs, "Unit")?;
            let program = scalar(&attrs, "Program")?.to_lowercase();
            Some((EntityId::new(id), program, attrs))
        }
        Category::Classpack | Category::Cte => Some((
            positional_id(region, position),
            category.program_types()[0].to_string(),
            attrs,
        )),
        Category::County => {
            // County rows carry their fields at the top level
            for (key, value) in extra {
                attrs.entry(key).or_insert(value);
            }
            let id = scalar(&attrs, "name")
                .map(EntityId::new)
                .unwrap_or_else(|| positional_id(region, position));
            Some((id, category.program_types()[0].to_string(), attrs))
        }
    }
}

fn positional_id(region: &str, position: usize) -> EntityId {
    EntityId::new(format!("{}#{}", region, position))
}

fn scalar(attrs: &Map<String, Value>, key: &str) -> Option<String> {
    match attrs.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
