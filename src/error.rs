//! Error types for the checkers.
//!
//! Components return [`CheckResult`] internally; their public boundaries turn
//! failures into log records and neutral results.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use crate::ports::filesystem::PortError;
use crate::python::layout::LayoutFault;

/// Result type alias for checker operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Everything that can go wrong while checking a project.
#[derive(Error, Debug)]
pub enum CheckError {
    /// A file could not be opened, read, or decoded as UTF-8.
    #[error("failed to read {path}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// A directory listing failed.
    #[error("failed to list {path}")]
    List {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// A Python source file contains syntax errors.
    #[error("syntax error in {path} at line {line}, column {column}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// 1-based line of the first error node.
        line: usize,
        /// 1-based column of the first error node.
        column: usize,
    },

    /// The source parses, but its layout or dialect is not valid Python 3.
    #[error("{fault} in {path} at line {line}")]
    Layout {
        /// File that was rejected.
        path: PathBuf,
        /// 1-based line of the first violation.
        line: usize,
        /// What the Python compiler would complain about.
        fault: LayoutFault,
    },

    /// The Python grammar could not be loaded into the parser.
    #[error("incompatible Python grammar")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree for {path}")]
    NoTree {
        /// File being parsed.
        path: PathBuf,
    },

    /// The configuration file is malformed.
    #[error("invalid configuration in {path}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// YAML decoding error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A filename pattern is not a valid glob.
    #[error("invalid file pattern '{pattern}'")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob compilation error.
        #[source]
        source: ignore::Error,
    },

    /// The path handed to a scan does not exist.
    #[error("no such file or directory: {path}")]
    MissingTarget {
        /// The requested file or directory.
        path: PathBuf,
    },

    /// A report file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },

    /// The log file could not be opened.
    #[error("cannot open log file {path}")]
    LogInit {
        /// Log file path.
        path: PathBuf,
        /// Appender initialisation error.
        #[source]
        source: tracing_appender::rolling::InitError,
    },
}

/// Renders an error followed by every `source()` in its chain.
///
/// This is what goes into log records in place of a traceback.
#[must_use]
pub fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str("\n  caused by: ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
