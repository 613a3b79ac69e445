use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Keeps the background log writer alive. Hold it until the process exits;
/// dropping it flushes buffered lines.
#[must_use = "dropping the guard stops the file writer"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Initialize the process-wide log sink.
///
/// Call exactly once at startup. Events go to `log_file` when given (appended,
/// never rotated) and to stderr otherwise.
pub fn init(service_name: &str, log_file: Option<&Path>) -> Result<LogGuard> {
    // Default: info for our crates and request traces. Override with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hd_core=info,hd_http=info,tower_http=info,{}=info",
            service_name.replace('-', "_")
        ))
    });

    let Some(path) = log_file else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(true)
            .try_init()
            .map_err(|e| Error::Config(format!("failed to install log subscriber: {e}")))?;
        return Ok(LogGuard { _worker: None });
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Config(format!("LOG_FILE has no file name: {}", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| Error::Config(format!("cannot open LOG_FILE {}: {e}", path.display())))?;
    let (writer, worker) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install log subscriber: {e}")))?;

    Ok(LogGuard {
        _worker: Some(worker),
    })
}
