//! Process-wide logging context.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Open `log_path` for appending and return a non-blocking writer.
///
/// The guard must outlive every log call; dropping it flushes the file.
pub fn create_log_writer(log_path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    let file_name = log_path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", log_path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Install the global subscriber writing to `log_path`.
///
/// Filter comes from `RUST_LOG`, `info` when unset.
pub fn init(log_path: &Path) -> Result<WorkerGuard> {
    let (writer, guard) = create_log_writer(log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(guard)
}
