//! Entity categories and their program-type catalogues.

use std::fmt;

use crate::surface::Icon;

/// The kinds of entity drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Team,
    School,
    Classpack,
    Cte,
    Unit,
    County,
}

impl Category {
    /// Every category, in load order.
    pub const ALL: [Category; 6] = [
        Category::Team,
        Category::Classpack,
        Category::School,
        Category::County,
        Category::Cte,
        Category::Unit,
    ];

    /// Path segment of the backend endpoint (`/api/<segment>/`).
    pub fn api_segment(&self) -> &'static str {
        match self {
            Category::Team => "teams",
            Category::School => "schools",
            Category::Classpack => "classpacks",
            Category::Cte => "ctes",
            Category::Unit => "units",
            Category::County => "counties",
        }
    }

    /// Singular display name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Team => "Team",
            Category::School => "School",
            Category::Classpack => "Classpack",
            Category::Cte => "CTE",
            Category::Unit => "Unit",
            Category::County => "County",
        }
    }

    /// Whether fetches for this category are scoped to a season.
    pub fn is_seasonal(&self) -> bool {
        matches!(self, Category::Team | Category::Classpack)
    }

    /// Known program types, in the order markers are placed.
    ///
    /// Categories without sub-types use a single tag equal to their API
    /// segment so every entity is reachable through the program index.
    pub fn program_types(&self) -> &'static [&'static str] {
        match self {
            Category::Team => &["flljr", "fll", "ftc", "frc"],
            Category::School => &["pub", "prv"],
            Category::Unit => &["troop", "pack", "crew", "post"],
            Category::Classpack => &["classpacks"],
            Category::Cte => &["ctes"],
            Category::County => &["counties"],
        }
    }

    /// True when entities are keyed by position in the region response
    /// rather than by a natural identifier.
    pub fn has_positional_ids(&self) -> bool {
        matches!(self, Category::Classpack | Category::Cte)
    }

    /// Marker icon for an entity of this category and program type.
    ///
    /// Returns `None` for counties (drawn as overlays) and for unknown
    /// program types of categories that key icons by program.
    pub fn icon(&self, program: &str) -> Option<Icon> {
        match (self, program) {
            (Category::Team, "flljr") => Some(Icon::GREEN_DOT),
            (Category::Team, "fll") => Some(Icon::RED_DOT),
            (Category::Team, "ftc") => Some(Icon::ORANGE_DOT),
            (Category::Team, "frc") => Some(Icon::BLUE_DOT),
            (Category::School, "pub") => Some(Icon::LTBLUE_DOT),
            (Category::School, "prv") => Some(Icon::PURPLE_DOT),
            (Category::Unit, "troop") => Some(Icon::RED_DOT),
            (Category::Unit, "pack") => Some(Icon::BLUE_DOT),
            (Category::Unit, "crew") => Some(Icon::GREEN_DOT),
            (Category::Unit, "post") => Some(Icon::PURPLE_DOT),
            (Category::Classpack, _) => Some(Icon::PINK_DOT),
            (Category::Cte, _) => Some(Icon::YELLOW_DOT),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}
