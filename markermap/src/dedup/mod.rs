//! Geo de-duplication.
//!
//! Markers that share a coordinate would hide each other. [`GeoResolver`]
//! keeps an occupancy table of every coordinate handed out in the current
//! mapping session and, on a collision, walks a ring of offsets around the
//! original point until it finds a free spot.
//!
//! # Ring search
//!
//! ```text
//!   ring r uses step = base_step × 2^r
//!
//!        +lat-lng (8)   +lat (1)   +lat+lng (5)
//!                  \       |       /
//!        -lng (4) ---- original ---- +lng (2)
//!                  /       |       \
//!        -lat-lng (7)   -lat (3)   -lat+lng (6)
//! ```
//!
//! Attempts go 1..=8 in the order above, then the step doubles. After
//! `max_rings` rings the original coordinate is accepted even though it
//! overlaps, and a warning is logged.
//!
//! The resolver is an explicit, session-scoped object: it is created (or
//! [`reset`](GeoResolver::reset)) when a new mapping pass begins and passed by
//! reference to every placement call.

mod resolver;

pub use resolver::{
    GeoResolver, Resolution, ResolverConfig, DEFAULT_MAX_RINGS, DEFAULT_STEP_DEGREES, MAX_RINGS,
    RING_DIRECTIONS,
};
