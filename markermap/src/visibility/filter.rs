//! Filter selections.

use crate::coord::GeoPoint;

/// "Has a FIRST team" selection for schools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstTeamFilter {
    #[default]
    Any,
    Yes,
    No,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    /// Show teams awarded any of these grants. Empty disables the filter.
    pub grants: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolFilter {
    /// Match any of these `Target_Levels`.
    pub levels: Vec<String>,
    /// Match any of these `Target_Programs`.
    pub programs: Vec<String>,
    pub first: FirstTeamFilter,
}

/// Active selections for a visibility pass.
///
/// Radius `0` (or no reference point) disables the distance check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterContext {
    pub reference: Option<GeoPoint>,
    pub radius_miles: f64,
    pub team: TeamFilter,
    pub school: SchoolFilter,
}

impl FilterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference(mut self, reference: GeoPoint, radius_miles: f64) -> Self {
        self.reference = Some(reference);
        self.radius_miles = radius_miles;
        self
    }

    pub fn with_grants<I, T>(mut self, grants: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.team.grants = grants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_levels<I, T>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.school.levels = levels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_programs<I, T>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.school.programs = programs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_first_teams(mut self, first: FirstTeamFilter) -> Self {
        self.school.first = first;
        self
    }

    /// Whether the distance check is active.
    pub fn radius_enabled(&self) -> bool {
        self.reference.is_some() && self.radius_miles != 0.0
    }
}
