//! Log sink port for persistent diagnostics.

use std::fmt;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Progress information.
    Info,
    /// Something suspicious that did not stop the component.
    Warning,
    /// A failure that forced a component to fall back to an empty result.
    Error,
}

impl LogLevel {
    /// Upper-case label used in log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives log records from every component.
///
/// The driver constructs one sink per run and hands it to components through
/// the service context; tests substitute a capturing sink.
pub trait LogSink: Send + Sync {
    /// Records one message at the given level.
    fn record(&self, level: LogLevel, message: &str);

    /// Records an info-level message.
    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    /// Records a warning-level message.
    fn warning(&self, message: &str) {
        self.record(LogLevel::Warning, message);
    }

    /// Records an error-level message.
    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }
}
