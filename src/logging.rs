//! Logging setup for the internstats CLI.
//!
//! Logs go to stderr (so stdout stays clean for the report) and, unless
//! disabled, to a daily-rotating file in the platform data directory.
//!
//! ```no_run
//! use internstats::logging::{self, LogOptions};
//!
//! logging::init(&LogOptions::default()).expect("Failed to initialize logging");
//! tracing::info!("Summarizer started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset
    pub verbose: bool,
    /// Also write to the rotating log file
    pub log_file: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            log_file: true,
        }
    }
}

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/internstats/logs`
/// - macOS: `~/Library/Application Support/internstats/logs`
/// - Linux: `~/.local/share/internstats/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("internstats").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn default_directive(options: &LogOptions) -> &'static str {
    if options.verbose { "debug" } else { "info" }
}

/// Initializes the global subscriber.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created, or
/// if a subscriber is already installed.
pub fn init(options: &LogOptions) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(options)))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, log_dir) = if options.log_file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("internstats")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create file appender")?;

        let layer = fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .with_writer(appender);
        (Some(layer), Some(log_dir))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!("Logging initialized, log directory: {:?}", dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_default_level() {
        let verbose = LogOptions {
            verbose: true,
            log_file: false,
        };
        assert_eq!(default_directive(&verbose), "debug");
        assert_eq!(default_directive(&LogOptions::default()), "info");
    }
}
