//! In-memory logger.

use std::fmt::Arguments;

use parking_lot::Mutex;

use crate::log::{LogLevel, Logger};

/// Keeps every line it receives, in order.
///
/// Used to check that absorbed failures were actually reported.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// True if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|(_, msg)| msg.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.lines.lock().push((level, args.to_string()));
    }
}
