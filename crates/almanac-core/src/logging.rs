//! File-backed `tracing` setup.
//!
//! A terminal UI owns stdout and stderr, so diagnostics go to a file. The
//! filter comes from the `ALMANAC_LOG` environment variable (standard
//! `EnvFilter` syntax, e.g. `almanac_widgets=debug`) and defaults to `info`.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ALMANAC_LOG";

/// Errors raised while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A global subscriber is already installed.
    #[error("log subscriber already installed: {0}")]
    Install(String),
}

/// Build the filter from [`LOG_ENV`], falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send `tracing` output to `path`, appending.
///
/// # Example
///
/// ```no_run
/// almanac_core::logging::init_file_logging("almanac.log").unwrap();
/// tracing::info!("picker ready");
/// ```
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), LoggingError> {
    let path = path.as_ref();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.display().to_string(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
