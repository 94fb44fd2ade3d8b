//! Show/hide evaluation over placed markers.
//!
//! Visibility never re-places anything. A pass looks at entities that
//! already own a marker and sets each marker's visibility from
//!
//! ```text
//! visible  AND  category predicate(entity, filter)  AND  within radius
//! ```
//!
//! Category predicates are small [`VisibilityPredicate`] strategies built
//! from two shared primitives, [`any_member`] and [`within_reference`].
//! Absent attributes simply fail membership checks.

mod engine;
mod filter;
mod predicate;

pub use engine::{VisibilityEngine, VisibilityReport};
pub use filter::{FilterContext, FirstTeamFilter, SchoolFilter, TeamFilter};
pub use predicate::{
    any_member, predicate_for, within_reference, PassAll, SchoolPredicate, TeamPredicate,
    VisibilityPredicate,
};
