use log::LevelFilter;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    // Only the first directive counts; "quadrant_dash=debug,hyper=info" reads as debug.
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = get_rust_log_level();
    should_log(event_level, threshold)
}

/// Where `log` records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to a file; used while the TUI owns the terminal.
    File(PathBuf),
}

/// Filter applied when `RUST_LOG` is unset or not a valid filter: this
/// crate only, at the level `get_rust_log_level` reads.
fn default_directive() -> String {
    let level = LevelFilter::from(get_rust_log_level()).to_string();
    format!("{}={}", env!("CARGO_CRATE_NAME"), level.to_lowercase())
}

/// Installs the global subscriber. `log` records are bridged into it, so the
/// HTTP client's `log::debug!` calls land in `target`.
pub fn init_logging(target: LogTarget) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init()?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_log_level() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("info"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("warn"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("WARNING"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("error"), LogLevel::Error);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);

        assert_eq!(parse_rust_log_level("quadrant_dash=debug"), LogLevel::Debug);
        assert_eq!(
            parse_rust_log_level("quadrant_dash=trace,reqwest=info"),
            LogLevel::Trace
        );

        assert_eq!(parse_rust_log_level("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
        assert!(!should_log(LogLevel::Info, LogLevel::Warn));
    }

    #[test]
    fn test_file_target_receives_log_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("quadrant-dash.log");

        init_logging(LogTarget::File(path.clone())).unwrap();
        log::error!("discovery endpoint unreachable");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("discovery endpoint unreachable"));
    }

    #[test]
    fn test_level_filter_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
