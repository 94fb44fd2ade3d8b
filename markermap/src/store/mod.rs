//! Per-category entity stores.
//!
//! Each [`EntityStore`] maps identifiers to entities, keeps a program-type
//! index in load order, tracks which attribute keys have been seen (for
//! building display tables without a fixed schema), and carries the
//! category's load state. [`MapDataset`] holds one shared store per
//! category.
//!
//! # Architecture
//!
//! ```text
//! MapDataset
//! ├── Team      → SharedStore (Arc<RwLock<EntityStore>>)
//! │   ├── entities:   "frc1073" → Entity { marker: Some(..), .. }
//! │   ├── programs:   flljr[] fll[] ftc[] frc["frc1073", ..]
//! │   ├── attributes: Team_Number, Program, Geo_Location, ..
//! │   └── state:      Idle → Loading(n) → Complete
//! ├── School ...
//! └── County ...
//! ```
//!
//! Stores are wrapped in `Arc<RwLock<_>>` so a spawned region loader can
//! merge into a store while the session polls its load flag. No lock is ever
//! held across an `.await`.

mod dataset;
mod entity_store;
mod ingest;

pub use dataset::MapDataset;
pub use entity_store::{EntityStore, LoadState, SharedStore};
pub use ingest::{ingest_region, IngestSummary};
