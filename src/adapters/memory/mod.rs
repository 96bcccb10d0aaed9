//! In-process adapters for tests and embedding.

pub mod clock;
pub mod filesystem;
pub mod log;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
pub use log::{LogRecord, MemoryLogSink};
