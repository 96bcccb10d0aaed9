//! Live log sink appending to a file under the project's log directory.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

use crate::error::{CheckError, CheckResult};
use crate::ports::clock::Clock;
use crate::ports::log::{LogLevel, LogSink};

/// Appends `timestamp - LEVEL - message` lines to a log file.
///
/// Every record is mirrored as a `tracing` event so `-v` surfaces it on
/// stderr. When the file could not be opened the sink keeps only the
/// tracing mirror.
pub struct FileLogSink {
    clock: Box<dyn Clock>,
    writer: Option<Mutex<RollingFileAppender>>,
}

impl FileLogSink {
    /// Opens (creating if needed) `<dir>/<file_name>` in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::LogInit`] if the directory or file cannot be
    /// created.
    pub fn open(dir: &Path, file_name: &str, clock: Box<dyn Clock>) -> CheckResult<Self> {
        let appender = build_appender(dir, file_name)
            .map_err(|source| CheckError::LogInit { path: dir.join(file_name), source })?;
        Ok(Self { clock, writer: Some(Mutex::new(appender)) })
    }

    /// Like [`FileLogSink::open`], but falls back to a tracing-only sink
    /// when the file is unavailable.
    #[must_use]
    pub fn open_or_degrade(dir: &Path, file_name: &str, clock: Box<dyn Clock>) -> Self {
        match build_appender(dir, file_name) {
            Ok(appender) => Self { clock, writer: Some(Mutex::new(appender)) },
            Err(e) => {
                eprintln!(
                    "Warning: cannot open log file {}: {e}; records will not be persisted",
                    dir.join(file_name).display()
                );
                Self { clock, writer: None }
            }
        }
    }

    /// Returns `true` when records reach the log file.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.writer.is_some()
    }
}

fn build_appender(dir: &Path, file_name: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder().rotation(Rotation::NEVER).filename_prefix(file_name).build(dir)
}

impl LogSink for FileLogSink {
    fn record(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }

        let Some(writer) = &self.writer else {
            return;
        };
        let line = format!("{} - {level} - {message}\n", self.clock.log_timestamp());
        let Ok(mut writer) = writer.lock() else {
            return;
        };
        if let Err(e) = writer.write_all(line.as_bytes()).and_then(|()| writer.flush()) {
            tracing::warn!("failed to append to log file: {e}");
        }
    }
}
