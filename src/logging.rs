//! Logging initialization
//!
//! The library only emits `tracing` events; the binary decides where they go.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Level used when none is configured
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter for `level`, falling back to [`DEFAULT_LEVEL`] when the
/// directive is empty or malformed
#[must_use]
pub fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return EnvFilter::new(DEFAULT_LEVEL);
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber.
///
/// Events go to stderr, or are appended to `file` without ANSI colours when
/// a path is given. Calling this twice is a no-op.
///
/// # Errors
/// Returns an error if the log file or its directory cannot be created
pub fn init(level: &str, file: Option<&Path>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_target(false);

    match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }

    debug!("Logging initialized at level {level}");
    Ok(())
}
