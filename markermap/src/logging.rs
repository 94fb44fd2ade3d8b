//! Process-wide tracing setup.
//!
//! Installs a subscriber that writes to a log file (cleared at session start)
//! and to stdout. The filter defaults to `info` and follows `RUST_LOG` when
//! set, e.g. `RUST_LOG=markermap=debug`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE};

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// The log file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Creates `log_dir` if needed and truncates `log_dir/log_file`.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Initialize logging.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    let path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path,
    })
}

/// [`init_logging`] with the `[logging]` section of the config file.
pub fn init_from_settings(settings: &LoggingSettings) -> Result<LoggingGuard, io::Error> {
    init_logging(&settings.directory, &settings.file)
}

/// Default log directory path.
pub fn default_log_dir() -> &'static str {
    DEFAULT_LOG_DIRECTORY
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    DEFAULT_LOG_FILE
}
