//! Category predicates and the primitives they share.

use serde_json::Value;

use super::filter::{FilterContext, FirstTeamFilter};
use crate::coord::{distance_miles, GeoPoint};
use crate::entity::{Category, Entity};

/// True when at least one of `wanted` appears in `have`.
pub fn any_member<A: AsRef<str>, B: AsRef<str>>(wanted: &[A], have: &[B]) -> bool {
    wanted
        .iter()
        .any(|w| have.iter().any(|h| h.as_ref() == w.as_ref()))
}

/// Distance check against the filter's reference point.
///
/// Passes when the check is disabled or the entity has no coordinate.
pub fn within_reference(location: Option<GeoPoint>, ctx: &FilterContext) -> bool {
    if !ctx.radius_enabled() {
        return true;
    }
    match (ctx.reference, location) {
        (Some(reference), Some(location)) => distance_miles(&reference, &location) <= ctx.radius_miles,
        _ => true,
    }
}

/// Category-specific part of the visibility decision.
pub trait VisibilityPredicate: Send + Sync {
    fn matches(&self, entity: &Entity, ctx: &FilterContext) -> bool;
}

/// Grant filter.
pub struct TeamPredicate;

impl VisibilityPredicate for TeamPredicate {
    fn matches(&self, entity: &Entity, ctx: &FilterContext) -> bool {
        let wanted = &ctx.team.grants;
        wanted.is_empty() || any_member(wanted, &entity.attr_list("Grants"))
    }
}

/// Whether the school carries a `First_Teams` value at all. An empty list
/// still counts; only a missing, null or empty-string field does not.
fn lists_first_teams(entity: &Entity) -> bool {
    match entity.attr("First_Teams") {
        None => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Level, target-program and FIRST-team filters.
pub struct SchoolPredicate;

impl SchoolPredicate {
    fn level_matches(entity: &Entity, ctx: &FilterContext) -> bool {
        let wanted = &ctx.school.levels;
        wanted.is_empty() || any_member(wanted, &entity.attr_list("Target_Levels"))
    }

    /// With target programs selected, a school passes if it targets one of
    /// them and its teams for that program satisfy the FIRST selection.
    /// Without, the FIRST selection alone applies.
    fn program_matches(entity: &Entity, ctx: &FilterContext) -> bool {
        let first_teams = entity.attr_list("First_Teams");
        let programs = &ctx.school.programs;

        if programs.is_empty() {
            let listed = lists_first_teams(entity);
            return match ctx.school.first {
                FirstTeamFilter::Any => true,
                FirstTeamFilter::Yes => listed,
                FirstTeamFilter::No => !listed,
            };
        }

        let targets = entity.attr_list("Target_Programs");
        programs
            .iter()
            .filter(|p| targets.iter().any(|t| t == *p))
            .any(|program| {
                let has_team = first_teams
                    .iter()
                    .any(|team| team.split('-').next() == Some(program.as_str()));
                match ctx.school.first {
                    FirstTeamFilter::Any => true,
                    FirstTeamFilter::Yes => has_team,
                    FirstTeamFilter::No => !has_team,
                }
            })
    }
}

impl VisibilityPredicate for SchoolPredicate {
    fn matches(&self, entity: &Entity, ctx: &FilterContext) -> bool {
        Self::level_matches(entity, ctx) && Self::program_matches(entity, ctx)
    }
}

/// No category filter: classpacks, CTEs, units.
pub struct PassAll;

impl VisibilityPredicate for PassAll {
    fn matches(&self, _entity: &Entity, _ctx: &FilterContext) -> bool {
        true
    }
}

pub fn predicate_for(category: Category) -> &'static dyn VisibilityPredicate {
    match category {
        Category::Team => &TeamPredicate,
        Category::School => &SchoolPredicate,
        Category::Classpack | Category::Cte | Category::Unit | Category::County => &PassAll,
    }
}
