//! Structured logging with tracing
//!
//! Console output on stderr, plain or JSON, with an optional daily-rotated
//! log file. Stdout stays free for command output.
//! `TG_LOG` overrides the configured filter.

use std::path::Path;

use tg_domain::error::{Error, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};

/// Initialize the global subscriber
///
/// Fails if the level is unknown or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE_STEM)),
        )
    });

    // Layer types differ between plain and JSON output, hence two branches
    let registry = Registry::default().with(filter);
    let installed = if config.json_format {
        let console = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);
        match file_appender {
            Some(appender) => registry
                .with(console)
                .with(fmt::layer().json().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.with(console).try_init(),
        }
    } else {
        let console = fmt::layer().with_writer(std::io::stderr).with_target(true);
        match file_appender {
            Some(appender) => registry
                .with(console)
                .with(fmt::layer().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.with(console).try_init(),
        }
    };
    installed.map_err(|e| Error::Configuration {
        message: "Failed to install the tracing subscriber".to_string(),
        source: Some(Box::new(e)),
    })?;

    info!(level = %level, json = config.json_format, "logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::config(format!(
            "Invalid log level: {}. Use trace, debug, info, warn, or error",
            level
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
