//! Logger that drops every line.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Discards all diagnostics. The default for sessions built without an
/// explicit logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
