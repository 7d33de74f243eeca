use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the background log writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// Console output goes to stderr so stdout stays clean for JSON output.
// With a log file, the same events are also written there without colors.
pub fn init_tracing_subscriber(log_file: Option<&Path>) -> anyhow::Result<LogGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let Some(log_file) = log_file else {
        tracing_subscriber::registry().with(console_layer).init();
        return Ok(LogGuard { _file: None });
    };

    let log_dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&log_dir)?;
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", log_file.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file: Some(guard),
    })
}
