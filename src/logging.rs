//! Tracing subscriber setup.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;

/// Install the global subscriber: stderr always, plus a daily rolling file in
/// `log_dir` when enabled. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn init(config: &LogConfig, log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file = if config.to_file {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("healthconnect")
            .filename_suffix("log")
            .build(log_dir)
            .map_err(|e| eprintln!("File logging disabled: {}", e))
            .ok()
    } else {
        None
    };

    match file {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
            None
        }
    }
}
