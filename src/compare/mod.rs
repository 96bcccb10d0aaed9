//! Design-document versus code comparison.
//!
//! [`diff`] computes per-module set differences, [`report`] renders them as
//! warnings and [`update`] turns them into suggested document edits.

pub mod diff;
pub mod report;
pub mod update;

pub use diff::{compare, ModuleDiff};
pub use report::format_report;
pub use update::suggest_updates;
