//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Timestamp layout used at the start of every log line
/// (`2024-06-15 10:30:00,123`).
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Provides the current time.
///
/// Log timestamps are taken from this port so tests can pin them with a
/// fixed clock.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time rendered with [`LOG_TIMESTAMP_FORMAT`].
    fn log_timestamp(&self) -> String {
        self.now().format(LOG_TIMESTAMP_FORMAT).to_string()
    }
}
