//! A mapping session.
//!
//! [`MapSession`] owns everything one map view needs for the lifetime of a
//! region/season selection: the per-category stores, the coordinate
//! resolver, the popup controller, the county overlays and the active
//! filter. Starting a new selection with [`MapSession::begin`] releases every
//! marker and resets the resolver; nothing else ever resets it.
//!
//! ```ignore
//! let mut session = MapSession::new(provider, surface, SessionConfig::default());
//! session.begin(vec!["NH".into(), "VT".into()], Some("2024".into()));
//! let loads = session.start_loading();
//! session.map_category(Category::Team).await?;
//! session.set_visibility(Category::Team, Some("frc"), true).await?;
//! ```

mod map_session;

pub use map_session::{MapSession, MappingOutcome, SessionConfig, SessionError};
