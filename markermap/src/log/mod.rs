//! Diagnostic logging seam.
//!
//! Placement and visibility passes absorb their failures (missing coordinates,
//! exhausted ring searches) and report them as log lines instead of errors.
//! Those lines go through the [`Logger`] trait so the engine does not depend
//! on a concrete backend and tests can assert on what was reported.
//!
//! - `TracingLogger`: forwards to the `tracing` crate
//! - `NoOpLogger`: discards everything
//! - `MemoryLogger`: keeps lines in memory for inspection
//!
//! ```
//! use markermap::log::{Logger, MemoryLogger};
//! use markermap::{log_info, log_warn};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let shared: Arc<dyn Logger> = logger.clone();
//!
//! log_info!(shared, "Mapping {} teams", 3);
//! log_warn!(shared, "No Geo Location for FRC Team {}", 1073);
//!
//! assert_eq!(logger.len(), 2);
//! assert!(logger.contains("Team 1073"));
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
