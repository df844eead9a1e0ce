//! Engine log layer
//!
//! Every engine module reports through the `engine_*` macros below, tagged
//! with a `scene_rig::<Component>` source. Entries go to whatever `Logger`
//! the `Engine` singleton holds (colored console output by default) once
//! they pass its minimum severity. Error entries carry their file and line.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination for engine log entries
///
/// ```no_run
/// use scene_rig_engine::scene_rig::log::{Logger, LogEntry};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("[{}] {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Component tag, e.g. "scene_rig::FrameScheduler"
    pub source: String,
    pub message: String,
    /// Set by `engine_error!` only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame detail
    Trace,
    Debug,
    /// Lifecycle: scheduler started, rig registered
    Info,
    /// Recoverable: degenerate surface size, empty registry
    Warn,
    /// Setup failures and controller faults
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by `DefaultLogger`
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Colored console logger: `[time] [SEVERITY] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        println!(
            "[{}] [{}] [{}] {}{}",
            datetime.format("%H:%M:%S%.3f"),
            severity,
            entry.source.bright_blue(),
            entry.message,
            location_suffix(entry)
        );
    }
}

/// " (file:line)" when both are known, empty otherwise
fn location_suffix(entry: &LogEntry) -> String {
    match (entry.file, entry.line) {
        (Some(file), Some(line)) => format!(" ({}:{})", file, line),
        _ => String::new(),
    }
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::scene_rig::Engine::log(
            $crate::scene_rig::log::LogSeverity::$severity,
            $source,
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Trace, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Debug, $source, $($arg)*) };
}

/// ```no_run
/// # use scene_rig_engine::engine_info;
/// engine_info!("scene_rig::FrameScheduler", "Scheduler started");
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Info, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Warn, $source, $($arg)*) };
}

/// Error entry with the caller's file and line
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::scene_rig::Engine::log_detailed(
            $crate::scene_rig::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an error and build the `Error` variant carrying the same message
///
/// ```no_run
/// # use scene_rig_engine::engine_err;
/// let err = engine_err!("scene_rig::CameraRigRegistry", DuplicateName, "Rig '{}' already exists", "main");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::scene_rig::Error::$variant(message)
    }};
}

/// `engine_err!` then return it as `Err`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
