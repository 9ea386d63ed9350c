/// Structured logging for the forecast service
///
/// Provides context-rich logging with area identifiers, timestamps, and
/// severity levels. Supports both console output and file-based logging.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Jma,
    Analysis,
    Config,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Jma => write!(f, "JMA"),
            DataSource::Analysis => write!(f, "STATS"),
            DataSource::Config => write!(f, "CFG"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the feed is between publications or the area has no forecast
    Expected,
    /// Unexpected failure - indicates service degradation or an API change
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    fn log(&self, level: LogLevel, source: &DataSource, area_code: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let area_part = area_code.map(|a| format!(" [{}]", a)).unwrap_or_default();
        let log_entry = format_entry(&timestamp.to_string(), level, source, area_code, message);

        // Console logging goes to stderr; stdout carries the rendered table.
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, area_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, area_part, message),
                LogLevel::Info => eprintln!("   {}", message),
                LogLevel::Debug => eprintln!("   [DEBUG] {}", message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

fn format_entry(
    timestamp: &str,
    level: LogLevel,
    source: &DataSource,
    area_code: Option<&str>,
    message: &str,
) -> String {
    let area_part = area_code.map(|a| format!(" [{}]", a)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, source, area_part, message)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    let logger = Logger {
        min_level,
        log_file: log_file.map(String::from),
        console_timestamps,
    };
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }
}

fn emit(level: LogLevel, source: DataSource, area_code: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &source, area_code, message);
        }
    }
}

/// Log a general informational message
pub fn info(source: DataSource, area_code: Option<&str>, message: &str) {
    emit(LogLevel::Info, source, area_code, message);
}

/// Log a warning message
pub fn warn(source: DataSource, area_code: Option<&str>, message: &str) {
    emit(LogLevel::Warning, source, area_code, message);
}

/// Log an error message
pub fn error(source: DataSource, area_code: Option<&str>, message: &str) {
    emit(LogLevel::Error, source, area_code, message);
}

/// Log a debug message
pub fn debug(source: DataSource, area_code: Option<&str>, message: &str) {
    emit(LogLevel::Debug, source, area_code, message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Classify a forecast failure from its error message
pub fn classify_feed_failure(error_message: &str) -> FailureType {
    if error_message.contains("HTTP error: 404") {
        // Unknown or retired area code
        FailureType::Expected
    } else if error_message.contains("HTTP")
        || error_message.contains("Request failed")
        || error_message.contains("Parse error")
    {
        FailureType::Unexpected
    } else {
        // Malformed feeds and missing day boundaries happen around
        // publication time and usually clear on the next run.
        FailureType::Unknown
    }
}

/// Log a forecast failure with automatic classification
pub fn log_feed_failure(area_code: &str, operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_feed_failure(&error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Expected => warn(DataSource::Jma, Some(area_code), &message),
        FailureType::Unexpected => error(DataSource::Jma, Some(area_code), &message),
        FailureType::Unknown => warn(DataSource::Jma, Some(area_code), &message),
    }
}

/// Log a configuration failure; the config could not be used at all
pub fn log_config_failure(err: &dyn std::error::Error) {
    error(
        DataSource::Config,
        None,
        &format!("Loading configuration failed: {}", err),
    );
}

/// Log what a successful run produced
pub fn log_run_summary(area_code: &str, slots: usize, unset_extrema: usize) {
    let message = format!(
        "Forecast processed: {} slots, {} extrema without a qualifying sample",
        slots, unset_extrema
    );

    if unset_extrema == 0 {
        info(DataSource::Analysis, Some(area_code), &message);
    } else {
        debug(DataSource::Analysis, Some(area_code), &message);
    }
}
