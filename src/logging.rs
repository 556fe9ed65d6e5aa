//! File logging. The terminal belongs to the board, so logs go to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "TWK_LOG_LEVEL";
const DEFAULT_LEVEL: &str = "warn";

/// Install a file-backed subscriber.
///
/// `level` is the first of `--log-level`, `$TWK_LOG_LEVEL` and the settings
/// file that is set; unknown names fall back to `warn`. Buffered lines are
/// written out when the returned guard is dropped, so hold it until the last
/// log call.
pub fn init_logging(level: Option<&str>) -> anyhow::Result<(PathBuf, WorkerGuard)> {
    let log_dir = get_log_directory()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory '{}'", log_dir.display()))?;

    let log_file_path = get_log_file_path(&log_dir);
    let (non_blocking, guard) = open_log_writer(&log_file_path)?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_log_filter(level))
        .with(file_layer)
        .try_init()
        .context("a global logger is already installed")?;

    tracing::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok((log_file_path, guard))
}

/// Create `path` and wrap it in a background writer.
fn open_log_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}

fn build_log_filter(level: Option<&str>) -> EnvFilter {
    let level = level.and_then(normalize_log_level).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::new(format!("{DEFAULT_LEVEL},taskwarrior_kanban={level},twk={level}"))
}

/// Pick the first configured level in priority order.
pub fn resolve_level(cli: Option<&str>, settings: Option<&str>) -> Option<String> {
    cli.map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| settings.map(str::to_string))
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

pub fn get_log_directory() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir().context("failed to determine local data directory")?;
    Ok(data_dir.join("taskwarrior-kanban").join("logs"))
}

pub fn get_log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    log_dir.join(format!("twk-{timestamp}.log"))
}
