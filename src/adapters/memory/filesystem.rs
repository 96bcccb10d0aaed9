//! In-memory filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::filesystem::{FileSystem, PortError};

/// Filesystem held in a map from path to raw bytes.
///
/// Directories exist implicitly as ancestors of stored files. Raw bytes are
/// kept so tests can store content that fails UTF-8 decoding. Clones share
/// storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a UTF-8 file, builder style.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.insert(path, contents.as_bytes().to_vec());
        self
    }

    /// Adds a file with arbitrary bytes, builder style.
    #[must_use]
    pub fn with_bytes(self, path: impl AsRef<Path>, bytes: &[u8]) -> Self {
        self.insert(path, bytes.to_vec());
        self
    }

    /// Inserts or replaces a file.
    pub fn insert(&self, path: impl AsRef<Path>, bytes: Vec<u8>) {
        self.lock().insert(path.as_ref().to_path_buf(), bytes);
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let files = self.lock();
        let bytes =
            files.get(path).ok_or_else(|| format!("file not found: {}", path.display()))?;
        Ok(String::from_utf8(bytes.clone())?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.insert(path, contents.as_bytes().to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().keys().any(|k| k.starts_with(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        if !self.is_dir(path) {
            return Err(format!("not a directory: {}", path.display()).into());
        }
        let mut names: Vec<String> = self
            .lock()
            .keys()
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| first.as_os_str().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn list_files_recursive(&self, path: &Path) -> Result<Vec<PathBuf>, PortError> {
        if !self.is_dir(path) {
            return Err(format!("not a directory: {}", path.display()).into());
        }
        Ok(self.lock().keys().filter(|k| k.starts_with(path) && *k != path).cloned().collect())
    }
}
