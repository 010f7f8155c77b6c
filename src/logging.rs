//! Logging setup for the `descry` binary.
//!
//! Events go to stderr (stdout carries results) and to a daily rolling file in
//! the platform data directory. `RUST_LOG` takes precedence over the level
//! passed to [`init`].
//!
//! ```no_run
//! descry::logging::init("info")?;
//! tracing::info!("ready");
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const LOG_PREFIX: &str = "descry";

/// Log directory, created if needed.
///
/// - Windows: `%APPDATA%/descry/logs`
/// - macOS: `~/Library/Application Support/descry/logs`
/// - Linux: `~/.local/share/descry/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("descry").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(log_dir)
}

/// Today's log file.
pub fn get_current_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("{LOG_PREFIX}.{today}.log")))
}

fn file_appender() -> Result<(RollingFileAppender, PathBuf)> {
    let log_dir = get_log_dir()?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;
    Ok((appender, log_dir))
}

/// Installs the global subscriber.
///
/// If the log directory is unusable, logging continues on stderr only and a
/// warning is emitted once the subscriber is up.
///
/// # Errors
///
/// Fails if `level` is not a valid filter directive, or if a global
/// subscriber is already installed.
pub fn init(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{level}'"))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_status) = match file_appender() {
        Ok((appender, dir)) => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            ),
            Ok(dir),
        ),
        Err(e) => (None, Err(e)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match file_status {
        Ok(dir) => match get_current_log_path() {
            Ok(file) => tracing::debug!("Logging initialized, writing to {}", file.display()),
            Err(_) => tracing::debug!("Logging initialized, log directory: {}", dir.display()),
        },
        Err(e) => tracing::warn!("File logging disabled: {e:#}"),
    }
    Ok(())
}
