//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a daily-rolling file instead of
//! stderr. One-shot commands log to stderr. `RUST_LOG` always wins over the
//! `--log-level` default.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_RUNTIME};

const LOG_FILE_PREFIX: &str = "bikes.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    /// Daily-rolling file inside the given directory.
    File(&'a Path),
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
///
/// The returned guard must be kept alive for the file writer to flush.
pub fn init(default_level: &str, target: LogTarget<'_>) -> Result<Option<WorkerGuard>, AppError> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter(default_level))
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize logging: {e}")))?;
            Ok(None)
        }
        LogTarget::File(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .map_err(|e| {
                    AppError::new(
                        EXIT_RUNTIME,
                        format!("Failed to open log directory '{}': {e}", dir.display()),
                    )
                })?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter(default_level))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize logging: {e}")))?;
            Ok(Some(guard))
        }
    }
}
