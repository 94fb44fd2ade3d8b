//! Per-category marker strategy: eligibility, icon and popup text.

use crate::entity::{Category, Entity};
use crate::surface::Icon;

/// How entities of one category become markers.
pub trait MarkerProfile: Send + Sync {
    /// Entities failing this are not placed at all.
    fn eligible(&self, _entity: &Entity) -> bool {
        true
    }

    fn icon(&self, entity: &Entity) -> Icon {
        entity
            .category()
            .icon(entity.program())
            .unwrap_or(Icon::DEFAULT_PIN)
    }

    /// Popup HTML.
    fn describe(&self, entity: &Entity) -> String;

    /// Short name used in diagnostics.
    fn label(&self, entity: &Entity) -> String {
        format!("{} {}", entity.category().label(), entity.id())
    }
}

fn registered(entity: &Entity) -> bool {
    entity.attr_str("Registered").as_deref() == Some("Yes")
}

pub struct TeamProfile;

impl MarkerProfile for TeamProfile {
    fn eligible(&self, entity: &Entity) -> bool {
        registered(entity)
    }

    fn describe(&self, e: &Entity) -> String {
        format!(
            "<b>{} Team {}, {}</b>.<br>From {}.<br>Located In {}, {}",
            e.attr_or_empty("Program"),
            e.attr_or_empty("Team_Number"),
            e.attr_or_empty("Team_Name"),
            e.attr_or_empty("Organization"),
            e.attr_or_empty("City"),
            e.attr_or_empty("State"),
        )
    }

    fn label(&self, e: &Entity) -> String {
        format!(
            "{} Team {}",
            e.attr_or_empty("Program"),
            e.attr_or_empty("Team_Number")
        )
    }
}

pub struct ClasspackProfile;

impl MarkerProfile for ClasspackProfile {
    fn eligible(&self, entity: &Entity) -> bool {
        registered(entity)
    }

    fn describe(&self, e: &Entity) -> String {
        format!(
            "<b>Classpack {}</b>.<br>From {}.<br>Located In {}, {}",
            e.attr_or_empty("Team_Number"),
            e.attr_or_empty("Organization"),
            e.attr_or_empty("City"),
            e.attr_or_empty("State"),
        )
    }

    fn label(&self, e: &Entity) -> String {
        format!("Classpack {}", e.attr_or_empty("Team_Number"))
    }
}

pub struct SchoolProfile;

impl MarkerProfile for SchoolProfile {
    fn describe(&self, e: &Entity) -> String {
        let mut html = format!(
            "<b>{}</b>.<br>From {}, {}.<br>{} serving grades {}.",
            e.attr_or_empty("School_Name"),
            e.attr_or_empty("City"),
            e.attr_or_empty("State"),
            e.attr_or_empty("Sch_Type_Desc"),
            e.attr_or_empty("Grade_Span"),
        );
        let teams = e.attr_list("First_Teams");
        if !teams.is_empty() {
            html.push_str(&format!("<br>Teams: {}.", teams.join(",")));
        }
        html
    }

    fn label(&self, e: &Entity) -> String {
        format!("School {}", e.attr_or_empty("School_Name"))
    }
}

pub struct CteProfile;

impl MarkerProfile for CteProfile {
    fn describe(&self, e: &Entity) -> String {
        format!("<b>{}</b>.", e.attr_or_empty("Name"))
    }
}

pub struct UnitProfile;

impl MarkerProfile for UnitProfile {
    fn describe(&self, e: &Entity) -> String {
        format!(
            "<b>{}</b><br>Chartered By  {}<br>From {}, {}.",
            e.attr_or_empty("Unit"),
            e.attr_or_empty("Name"),
            e.attr_or_empty("City"),
            e.attr_or_empty("State"),
        )
    }
}

/// The profile for a category. Counties are drawn as overlays and have none.
pub fn profile_for(category: Category) -> Option<&'static dyn MarkerProfile> {
    match category {
        Category::Team => Some(&TeamProfile),
        Category::School => Some(&SchoolProfile),
        Category::Classpack => Some(&ClasspackProfile),
        Category::Cte => Some(&CteProfile),
        Category::Unit => Some(&UnitProfile),
        Category::County => None,
    }
}
