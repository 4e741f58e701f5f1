use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Sends logs to the configured file; the terminal belongs to the UI.
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init(settings: &Settings) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&settings.log_path())?;
    fs::create_dir_all(&dir).with_context(|| format!("creating log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log_file {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_os_string()))
}
