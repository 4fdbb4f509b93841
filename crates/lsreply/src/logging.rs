//! Stderr diagnostics for the CLI.
//!
//! The helper crates never print. Swallowed bus failures are logged at
//! `error`, rejected payloads and loopback traffic at `debug`. This module
//! decides which of those reach the terminal.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_LEVEL_ENV: &str = "LSREPLY_LOG_LEVEL";
/// Environment variable consulted when `--log-format` is absent.
pub const LOG_FORMAT_ENV: &str = "LSREPLY_LOG_FORMAT";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    Text,
    /// One JSON object per event, fields flattened.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Nothing, not even swallowed send failures.
    Off,
    Error,
    Warn,
    Info,
    /// Adds rejected payloads and every loopback reply/post.
    Debug,
    Trace,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the process-wide stderr subscriber.
///
/// Returns false if a subscriber was already installed; the first one wins.
pub fn init_logging(format: LogFormat, level: LogLevel) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.level_filter())
        .with_ansi(false)
        .with_target(true);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
    installed.is_ok()
}
