//! Live filesystem adapter using `std::fs`.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::ports::filesystem::{FileSystem, PortError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so dangling links still count as entries
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn list_files_recursive(&self, path: &Path) -> Result<Vec<PathBuf>, PortError> {
        let mut files = Vec::new();
        // Every file counts: hidden entries and ignore files do not filter.
        for entry in WalkBuilder::new(path).standard_filters(false).build() {
            let entry = entry?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_directory_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.py"), "").unwrap();
        std::fs::write(dir.path().join("a.py"), "").unwrap();

        let names = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }

    #[test]
    fn recursive_listing_descends_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg/sub")).unwrap();
        std::fs::write(dir.path().join("pkg/sub/deep.py"), "").unwrap();
        std::fs::write(dir.path().join("top.py"), "").unwrap();

        let files = LiveFileSystem.list_files_recursive(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("pkg/sub/deep.py")));
    }

    #[test]
    fn recursive_listing_keeps_hidden_and_ignored_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join(".cache/hidden.py"), "").unwrap();
        std::fs::write(dir.path().join(".ignore"), "skipped.py\n").unwrap();
        std::fs::write(dir.path().join(".gitignore"), "skipped.py\n").unwrap();
        std::fs::write(dir.path().join("skipped.py"), "").unwrap();

        let files = LiveFileSystem.list_files_recursive(dir.path()).unwrap();
        assert!(files.iter().any(|f| f.ends_with(".cache/hidden.py")));
        assert!(files.iter().any(|f| f.ends_with("skipped.py")));
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports/dupes.txt");

        LiveFileSystem.write(&target, "report").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&target).unwrap(), "report");
        assert!(LiveFileSystem.is_dir(&dir.path().join("reports")));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("latin1.py");
        std::fs::write(&target, [0x66, 0x6f, 0xff, 0x6f]).unwrap();

        assert!(LiveFileSystem.read_to_string(&target).is_err());
    }
}
