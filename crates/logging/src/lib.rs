// logging crate

use chrono::Local;
use once_cell::sync::Lazy;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// Current log level. Library callers only hear about warnings and errors
// unless they opt in.
static LOG_LEVEL: Lazy<Arc<Mutex<LogLevel>>> =
    Lazy::new(|| Arc::new(Mutex::new(LogLevel::Warning)));

// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

// Set the current log level
pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
    log::set_max_level(level.as_filter());
}

// Get the current log level
pub fn get_log_level() -> LogLevel {
    if let Ok(level) = LOG_LEVEL.lock() {
        *level
    } else {
        LogLevel::Warning
    }
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S").to_string();
    format!("[{}] {} {}", timestamp, level.prefix(), message)
}

// Log a message with timestamp and level. Everything goes to stderr so
// stdout stays reserved for command output.
pub fn log(level: LogLevel, message: &str) {
    if level >= get_log_level() {
        eprintln!("{}", format_line(level, message));
    }
}

// Convenience functions for different log levels
pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

/// Routes records emitted through the `log` facade (e.g. by the TLS stack)
/// to the same output, tagged with their target.
struct Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LogLevel::from(metadata.level()) >= get_log_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            crate::log(
                record.level().into(),
                &format!("{}: {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

static BRIDGE: Bridge = Bridge;

/// Install the `log` facade bridge. Safe to call more than once; only the
/// first call registers the logger.
pub fn install_log_bridge() {
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(get_log_level().as_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" error ".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_line_format() {
        let line = format_line(LogLevel::Warning, "no store configured");
        assert!(line.starts_with('['));
        assert!(line.ends_with("⚠️ no store configured"));
    }

    // The level is process-wide, so everything touching it lives in one test.
    #[test]
    fn test_threshold_applies_to_bridged_records() {
        assert_eq!(get_log_level(), LogLevel::Warning);

        let info = log::Metadata::builder().level(log::Level::Info).build();
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        assert!(!BRIDGE.enabled(&info));
        assert!(BRIDGE.enabled(&warn));

        set_log_level(LogLevel::Debug);
        assert!(BRIDGE.enabled(&info));
        set_log_level(LogLevel::Warning);
    }
}
