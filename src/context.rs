//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::log::FileLogSink;
use crate::adapters::memory::{FixedClock, MemoryFileSystem, MemoryLogSink};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::log::LogSink;

/// Bundles all port trait objects into a single context.
///
/// Every component receives the context by reference; constructors wire up
/// live or in-memory adapters.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Destination of log records.
    pub log: Box<dyn LogSink>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>, log: Box<dyn LogSink>) -> Self {
        Self { clock, fs, log }
    }

    /// Creates a live context that logs to `<log_dir>/<log_file>`.
    ///
    /// If the log file cannot be opened, records still reach `tracing`.
    #[must_use]
    pub fn live(log_dir: &Path, log_file: &str) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            log: Box::new(FileLogSink::open_or_degrade(log_dir, log_file, Box::new(LiveClock))),
        }
    }

    /// Creates an in-memory context whose log records are discarded.
    #[must_use]
    pub fn in_memory(fs: MemoryFileSystem) -> Self {
        Self::in_memory_with_log(fs, MemoryLogSink::new())
    }

    /// Creates an in-memory context logging into `log`.
    ///
    /// Keep a clone of `log` to inspect the records afterwards.
    #[must_use]
    pub fn in_memory_with_log(fs: MemoryFileSystem, log: MemoryLogSink) -> Self {
        Self { clock: Box::new(FixedClock::epoch()), fs: Box::new(fs), log: Box::new(log) }
    }
}
