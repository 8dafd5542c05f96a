use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::config::LoggingConfig;
use crate::domain::DomainError;

const LOG_FILE: &str = "parscribe.log";

/// Initialize logging: console output always, JSON file output with daily
/// rotation when `config.file_logging` is set.
///
/// Returns a guard that must be kept alive for the duration of the
/// application; dropping it flushes any remaining file logs.
pub fn init_logging(
    logs_dir: &Path,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>, DomainError> {
    let level = parse_level(&config.level);

    // RUST_LOG overrides the configured console filter when present.
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter(level, true));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(console_filter);

    if !config.file_logging {
        // try_init: a second initialization is a no-op, not a panic.
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        tracing::info!(level = %level, "Logging initialized (console only)");
        return Ok(None);
    }

    fs::create_dir_all(logs_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(crate_filter(level, false));

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(
            logs_dir = ?logs_dir,
            level = %level,
            "Logging initialized with file output"
        );
    }

    Ok(Some(guard))
}

/// Parse the configured level, falling back to `info` on anything unknown.
fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Filter for this crate at `level`. The console variant also lets warnings
/// from dependencies through; the file variant logs this crate only.
fn crate_filter(level: LevelFilter, include_dependency_warnings: bool) -> EnvFilter {
    let mut filter = EnvFilter::default();

    if include_dependency_warnings {
        filter = filter.add_directive(LevelFilter::WARN.into());
    }

    if let Ok(directive) = format!("parscribe={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("WARN"), LevelFilter::WARN);
        assert_eq!(parse_level(" trace "), LevelFilter::TRACE);
        // Unknown or empty levels fall back to info.
        assert_eq!(parse_level("verbose"), LevelFilter::INFO);
        assert_eq!(parse_level(""), LevelFilter::INFO);
    }

    #[test]
    fn test_console_filter_includes_dependency_warnings() {
        let filter = crate_filter(LevelFilter::DEBUG, true).to_string();
        assert!(filter.contains("parscribe=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn test_file_filter_is_crate_only() {
        let filter = crate_filter(LevelFilter::INFO, false).to_string();
        assert!(filter.contains("parscribe=info"));
        assert!(!filter.contains("warn"));
    }
}
