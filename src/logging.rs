//! Logging setup.
//!
//! Logs go to the console and to a daily-rolling file in the platform data
//! directory (`<data dir>/sheetload/logs`). The level defaults to `info` and
//! can be changed with `RUST_LOG`.

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/sheetload/logs`
/// - macOS: `~/Library/Application Support/sheetload/logs`
/// - Linux: `~/.local/share/sheetload/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("sheetload").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Installs the global subscriber.
///
/// The file layer is skipped if the log directory is unavailable; console
/// logging always works.
///
/// # Errors
///
/// Returns error if the filter cannot be built or a subscriber is already set
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    let (file_layer, log_dir) = match file_appender() {
        Ok((appender, dir)) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender);
            (Some(layer), Some(dir))
        }
        Err(e) => {
            eprintln!("File logging disabled: {e:#}");
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!("Logging initialized, log directory: {}", dir.display());
    }

    Ok(())
}

fn file_appender() -> Result<(RollingFileAppender, PathBuf)> {
    let log_dir = get_log_dir()?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("sheetload")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;
    Ok((appender, log_dir))
}
