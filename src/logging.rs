//! Logging initialization.
//!
//! Wizard mode: logs to `{paths.state}/logs/survey-wizard-{datetime}.log`
//! so output does not tear through the alternate screen.
//! Subcommands: logs to stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the background writer alive; drop it last to flush buffered lines
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,

    /// Set only when logging to a file
    pub log_file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LogSink {
    File { dir: PathBuf, name: String },
    Stderr,
}

fn log_file_name(now: DateTime<Utc>) -> String {
    format!("survey-wizard-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

fn choose_sink(config: &Config, is_tui_mode: bool, now: DateTime<Utc>) -> LogSink {
    if is_tui_mode && config.logging.to_file {
        LogSink::File {
            dir: config.logs_path(),
            name: log_file_name(now),
        }
    } else {
        LogSink::Stderr
    }
}

/// `RUST_LOG` wins over the configured level; `--debug` wins over config
fn filter_directive(config: &Config, debug_override: bool) -> String {
    let level = if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    std::env::var("RUST_LOG").unwrap_or(level)
}

/// Install the global subscriber. Call once, before the terminal is taken
/// over.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = EnvFilter::new(filter_directive(config, debug_override));

    match choose_sink(config, is_tui_mode, Utc::now()) {
        LogSink::File { dir, name } => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let log_file_path = dir.join(&name);

            let file_appender = tracing_appender::rolling::never(&dir, &name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(log_file_path),
            })
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}

/// Human-readable location for the startup banner
pub fn describe(handle: &LoggingHandle) -> String {
    handle
        .log_file_path
        .as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "stderr".to_string())
}
