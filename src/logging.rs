//! File logging for burrow.
//!
//! The terminal belongs to the UI, so diagnostics never go to stderr. Logging is
//! opt-in: it is only enabled when `BURROW_LOG` holds a filter directive such as
//! `debug` or `burrow_tui=trace`.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Filter directive variable. Unset means no logging at all.
pub const LOG_ENV: &str = "BURROW_LOG";
/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "BURROW_LOG_FILE";

pub struct Logger;

impl Logger {
    /// Call once near the start of `main`.
    ///
    /// Returns the log file path when a subscriber was installed.
    pub fn init() -> Option<PathBuf> {
        let directive = std::env::var(LOG_ENV).ok()?;
        let filter = EnvFilter::try_new(directive.trim()).ok()?;

        let file = log_file_path(std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))?;
        let dir = file.parent()?;
        let name = file.file_name()?.to_string_lossy().into_owned();
        std::fs::create_dir_all(dir).ok()?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name)
            .build(dir)
            .ok()?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .try_init()
            .ok()?;

        tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
        Some(file)
    }
}

/// Picks the explicit override or `<cache dir>/burrow/burrow.log`.
fn log_file_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .filter(|p| p.file_name().is_some())
        .or_else(|| dirs::cache_dir().map(|d| d.join("burrow").join("burrow.log")))
}
