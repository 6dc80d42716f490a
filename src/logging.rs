//! Logging setup
//!
//! The CLI logs to stderr. The GUI and TUI own the screen, so they log to
//! `moviedb-explorer.log` beside the executable instead, or in the working
//! directory when that is read-only, or stderr as a last resort. Verbosity follows
//! `RUST_LOG` and defaults to `info`.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const LOG_FILE_NAME: &str = "moviedb-explorer.log";
const DEFAULT_FILTER: &str = "info";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Get the log file path (same directory as executable)
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Log file candidates: beside the executable, then the working directory
fn log_candidates() -> Vec<PathBuf> {
    vec![log_path(), PathBuf::from(LOG_FILE_NAME)]
}

/// Open the first candidate that can be written
fn open_log_file(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates.iter().find_map(|path| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true) // Start fresh each run
            .open(path)
            .map(|file| (path.clone(), file))
            .map_err(|e| eprintln!("[moviedb] cannot open log file {}: {}", path.display(), e))
            .ok()
    })
}

fn init_stderr() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Install the global subscriber. Calling it twice is harmless.
///
/// A file target that cannot be opened anywhere logs to stderr instead.
pub fn init(target: LogTarget) {
    let (result, file_path) = match target {
        LogTarget::Stderr => (init_stderr(), None),
        LogTarget::File => match open_log_file(&log_candidates()) {
            Some((path, file)) => {
                let result = tracing_subscriber::registry()
                    .with(env_filter())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_ansi(false)
                            .with_writer(Mutex::new(file)),
                    )
                    .try_init();
                (result, Some(path))
            }
            None => (init_stderr(), None),
        },
    };

    if result.is_ok() {
        match file_path {
            Some(path) => tracing::debug!(target = ?target, path = %path.display(), "logging initialised"),
            None => tracing::debug!(target = ?target, "logging initialised"),
        }
    }
}
