//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: a branch of the run failed
//! - `warn`: skipped rows, medications missing from the knowledge base
//! - `info`: stage progress and counts
//! - `debug`: per-patient and per-medication detail
//! - `trace`: reserved for row-level data
//!
//! Patient identifiers are protected health information. They are only
//! written to logs when [`LogConfig::log_data`] is set; otherwise
//! [`redact_value`] replaces them with [`REDACTED_VALUE`].

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when identifier logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level. Everything else stays at `warn`.
const WORKSPACE_TARGETS: &[&str] = &[
    "interact_cli",
    "interact_engine",
    "interact_ingest",
    "interact_model",
    "interact_report",
];

pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the value when identifier logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs are appended to this file instead of stderr and carry timestamps.
    pub log_file: Option<PathBuf>,
    /// Whether patient identifiers may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            install(config, Mutex::new(file), true);
        }
        None => install(config, io::stderr, false),
    }
    Ok(())
}

fn install<W>(config: &LogConfig, writer: W, timestamps: bool)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry()
        .with(build_env_filter(config.level_filter, config.use_env_filter));
    let ansi = config.with_ansi;
    match (config.format, timestamps) {
        (LogFormat::Json, _) => registry
            .with(fmt::layer().json().with_writer(writer))
            .init(),
        (LogFormat::Compact, true) => registry
            .with(fmt::layer().compact().with_writer(writer).with_ansi(ansi))
            .init(),
        (LogFormat::Compact, false) => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(writer)
                    .with_ansi(ansi),
            )
            .init(),
        (LogFormat::Pretty, true) => registry
            .with(fmt::layer().with_writer(writer).with_ansi(ansi))
            .init(),
        (LogFormat::Pretty, false) => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_writer(writer)
                    .with_ansi(ansi),
            )
            .init(),
    }
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = String::from("warn");
    for target in WORKSPACE_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(&level);
    }
    directives
}

fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level));
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("interact_engine=debug"));
        assert!(directives.contains("interact_ingest=debug"));
    }

    #[test]
    fn off_level_renders() {
        assert!(default_directives(LevelFilter::OFF).contains("interact_cli=off"));
    }

    #[test]
    fn patient_ids_redacted_unless_enabled() {
        LOG_DATA_ENABLED.store(false, Ordering::Release);
        assert_eq!(redact_value("P-0042"), REDACTED_VALUE);
        LOG_DATA_ENABLED.store(true, Ordering::Release);
        assert_eq!(redact_value("P-0042"), "P-0042");
        LOG_DATA_ENABLED.store(false, Ordering::Release);
    }
}
