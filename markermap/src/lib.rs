//! MarkerMap - marker placement and spatial de-duplication for region maps
//!
//! Entities (teams, schools, classpacks, CTE centres, units and counties) are
//! fetched region by region from a backend API and drawn on an interactive
//! map. This crate is the engine between the two: it loads and indexes the
//! entities, gives every marker a coordinate no other marker uses, and shows
//! or hides markers from composable filters without re-fetching or
//! re-placing anything.
//!
//! # Data flow
//!
//! ```text
//! DataProvider ──region by region──► RegionLoader ──merge──► EntityStore
//!                                                               │ fully loaded
//!                                                               ▼
//!          MapSurface ◄── marker + popup ── PlacementEngine ◄── GeoResolver
//!              ▲                                                 (session-scoped)
//!              └──────── show / hide ── VisibilityEngine ◄── FilterContext
//! ```
//!
//! # High-Level API
//!
//! [`session::MapSession`] wires the pieces together:
//!
//! ```ignore
//! use markermap::config::ConfigFile;
//! use markermap::entity::Category;
//! use markermap::provider::HttpDataProvider;
//! use markermap::session::MapSession;
//!
//! let config = ConfigFile::load()?;
//! let provider = Arc::new(HttpDataProvider::new(config.provider_config())?);
//! let mut session = MapSession::new(provider, surface, config.session_config());
//!
//! session.begin(config.provider.regions.clone(), config.provider.season.clone());
//! session.start_loading();
//! session.map_category(Category::Team).await?;
//! session.set_visibility(Category::Team, Some("frc"), true).await?;
//! ```

pub mod config;
pub mod coord;
pub mod county;
pub mod dedup;
pub mod entity;
pub mod loader;
pub mod log;
pub mod logging;
pub mod placement;
pub mod popup;
pub mod provider;
pub mod session;
pub mod store;
pub mod surface;
pub mod visibility;

/// Version of the MarkerMap library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
