//! Logging setup.
//!
//! One `tracing` registry with two layers:
//! - a pretty human-readable stdout layer
//! - a JSON file layer in the app data directory, rotated daily
//!
//! Records emitted through the `log` crate are forwarded to `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix of the rolling log files.
pub const LOG_FILE_NAME: &str = "tourdesk.log";

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Directory the file layer writes to.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tourdesk").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize logging into the default directory.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered file output is flushed on shutdown.
pub fn init() -> WorkerGuard {
    init_in(&log_dir())
}

/// Initialize logging into `dir`.
pub fn init_in(dir: &Path) -> WorkerGuard {
    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create logs directory {}: {e}", dir.display());
        }
    }

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(EnvFilter::new("debug"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .pretty()
        .with_filter(env_filter);

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {e}");
        return guard;
    }

    // Redirect `log` records to `tracing`
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {e}");
    }

    tracing::info!("Logging initialized. Writing to: {:?} (daily rolling)", dir.join(LOG_FILE_NAME));

    guard
}
