//! Filesystem port for file I/O operations.

use std::path::{Path, PathBuf};

/// Boxed error returned by port operations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Provides filesystem access for the checkers.
///
/// Every component reads through this trait so that it can be exercised
/// against an in-memory tree without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if any filesystem entry exists at the path.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names directly inside a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError>;

    /// Lists every file below a directory, recursively, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked.
    fn list_files_recursive(&self, path: &Path) -> Result<Vec<PathBuf>, PortError>;
}
