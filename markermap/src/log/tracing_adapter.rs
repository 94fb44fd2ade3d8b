//! Adapter from [`Logger`] to the `tracing` crate.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards diagnostics to `tracing` under the `markermap` target, so they
/// land in whatever subscriber [`crate::logging::init_logging`] installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "markermap", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "markermap", "{}", args),
            LogLevel::Info => tracing::info!(target: "markermap", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "markermap", "{}", args),
            LogLevel::Error => tracing::error!(target: "markermap", "{}", args),
        }
    }
}
