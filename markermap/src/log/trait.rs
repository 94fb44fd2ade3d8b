//! Logger trait definition.

use std::fmt::{self, Arguments};

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Absorbed failures such as ring-search exhaustion
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Sink for diagnostic lines emitted by loaders and placement passes.
///
/// Implementations must be `Send + Sync` so a single logger can be shared
/// between the session and the per-category loaders.
pub trait Logger: Send + Sync {
    /// Record one formatted line at `level`.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Format-string logging macros over any `Logger` expression.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}
