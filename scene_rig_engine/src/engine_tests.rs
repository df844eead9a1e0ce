//! Unit tests for the Engine logging services
//!
//! IMPORTANT: LOGGER and MIN_SEVERITY are process-wide statics shared by all
//! tests. Every test here is #[serial] and restores the defaults on exit.

use crate::scene_rig::Engine;
use crate::scene_rig::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Captures entries whose source starts with `engine_tests::`
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source.starts_with("engine_tests::") {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_entries() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "engine_tests::a", "hello".to_string());

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "hello");
    assert!(entries[0].file.is_none());
    drop(entries);
    teardown();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "engine_tests::b", "boom".to_string(), "engine.rs", 7);

    let entries = entries.lock().unwrap();
    assert_eq!(entries[0].file, Some("engine.rs"));
    assert_eq!(entries[0].line, Some(7));
    drop(entries);
    teardown();
}

#[test]
#[serial]
fn test_min_severity_filters() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);

    Engine::log(LogSeverity::Debug, "engine_tests::c", "dropped".to_string());
    Engine::log(LogSeverity::Info, "engine_tests::c", "dropped".to_string());
    Engine::log(LogSeverity::Warn, "engine_tests::c", "kept".to_string());
    Engine::log(LogSeverity::Error, "engine_tests::c", "kept".to_string());

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.message == "kept"));
    drop(entries);
    teardown();
}

#[test]
#[serial]
fn test_trace_enabled_when_lowered() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Trace);

    crate::engine_trace!("engine_tests::d", "frame {}", 3);

    assert_eq!(entries.lock().unwrap()[0].message, "frame 3");
    teardown();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "engine_tests::e", "to stdout".to_string());

    assert!(entries.lock().unwrap().is_empty());
    teardown();
}

#[test]
#[serial]
fn test_engine_err_logs_once() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let err = crate::engine_err!("engine_tests::f", Cycle, "node {} under itself", "a");

    assert_eq!(err.to_string(), "Cycle in node hierarchy: node a under itself");
    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert!(entries[0].line.is_some());
    drop(entries);
    teardown();
}
