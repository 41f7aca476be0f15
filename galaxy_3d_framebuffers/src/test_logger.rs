/// Capturing logger shared by unit tests
///
/// Only entries whose source matches the filter are kept, so logs emitted by
/// tests running on other threads do not leak into assertions.

use std::sync::{Arc, Mutex};
use crate::engine::Engine;
use crate::log::{Logger, LogEntry, LogSeverity};

pub struct CaptureLogger {
    source: &'static str,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    /// Install a capturing logger for `source` and return its entry buffer
    pub fn install(source: &'static str) -> Arc<Mutex<Vec<LogEntry>>> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Engine::set_logger(CaptureLogger {
            source,
            entries: entries.clone(),
        });
        entries
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == self.source {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

/// Messages of the given severity
pub fn messages(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}
