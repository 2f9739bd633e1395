//! File logging. The picker owns the terminal, so nothing is logged to it.

use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Stable name of the symlink pointing at the newest log.
pub const LATEST_LOG: &str = "marklaunch.log";

/// Set up logging with file output in the system temp directory.
///
/// `RUST_LOG` overrides the level; otherwise `debug` with `--debug` or in debug
/// builds, `warn` in release builds.
pub fn setup_logging(debug_flag: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(debug_flag)));

    let log_dir = std::env::temp_dir();
    let log_filename = log_file_name(&chrono::Local::now());
    link_latest(&log_dir, &log_dir.join(&log_filename));

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushing must outlive main; the process exits right after the session.
    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

fn default_level(debug_flag: bool) -> &'static str {
    if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    }
}

fn log_file_name<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("marklaunch-{}.log", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(unix)]
fn link_latest(dir: &Path, log_path: &Path) -> PathBuf {
    let symlink_path = dir.join(LATEST_LOG);
    let _ = std::fs::remove_file(&symlink_path);
    let _ = std::os::unix::fs::symlink(log_path, &symlink_path);
    symlink_path
}

#[cfg(not(unix))]
fn link_latest(dir: &Path, _log_path: &Path) -> PathBuf {
    dir.join(LATEST_LOG)
}
