//! Capturing log sink.

use std::sync::{Arc, Mutex};

use crate::ports::log::{LogLevel, LogSink};

/// One captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity of the record.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
}

/// Keeps every record in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a
/// `ServiceContext` and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all records so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Returns the records at exactly `level`.
    #[must_use]
    pub fn at_level(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records().into_iter().filter(|r| r.level == level).collect()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, level: LogLevel, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord { level, message: message.to_string() });
        }
    }
}
