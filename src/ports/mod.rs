//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the checking core and the
//! outside world (time, filesystem, log output). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod log;

pub use clock::Clock;
pub use filesystem::{FileSystem, PortError};
pub use log::{LogLevel, LogSink};
