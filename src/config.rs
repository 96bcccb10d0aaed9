//! Checker configuration: project layout and required files.
//!
//! Defaults describe the audited project's shipped layout. An optional
//! `spec_checker.yaml` at the project root overrides individual fields, and
//! `SPEC_CHECKER_*` environment variables (after `.env` loading) override
//! the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CheckError, CheckResult};
use crate::ports::filesystem::FileSystem;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE_NAME: &str = "spec_checker.yaml";

/// Design document the checker reads by default.
pub const DEFAULT_DESIGN_DOC: &str = "docs/spec.md";

/// Directory holding the audited Python modules.
pub const DEFAULT_MODULES_DIR: &str = "modules";

/// Directory receiving the log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Paths that must exist before any other check runs.
pub const DEFAULT_REQUIRED_FILES: &[&str] = &[DEFAULT_DESIGN_DOC, "main.py", DEFAULT_MODULES_DIR];

/// Log file written by the compliance checker.
pub const CHECKER_LOG_FILE: &str = "spec_checker.log";

/// Log file written by the duplicate-function detector.
pub const DUPLICATES_LOG_FILE: &str = "duplicate_functions.log";

/// Resolved configuration. All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// The design document to audit against.
    pub design_doc: PathBuf,
    /// Directory containing `<module>.py` files.
    pub modules_dir: PathBuf,
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Paths asserted present before checking.
    pub required_files: Vec<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            design_doc: PathBuf::from(DEFAULT_DESIGN_DOC),
            modules_dir: PathBuf::from(DEFAULT_MODULES_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            required_files: DEFAULT_REQUIRED_FILES.iter().map(PathBuf::from).collect(),
        }
    }
}

/// On-disk shape of `spec_checker.yaml`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    design_doc: Option<PathBuf>,
    modules_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    required_files: Option<Vec<PathBuf>>,
}

impl CheckerConfig {
    /// Loads the configuration for the project at `root`.
    ///
    /// Takes the bare filesystem port because the log sink cannot exist
    /// before the log directory is known. A missing configuration file means
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> CheckResult<Self> {
        let mut config = Self::default();

        let path = root.join(CONFIG_FILE_NAME);
        if fs.exists(&path) {
            let content = fs
                .read_to_string(&path)
                .map_err(|source| CheckError::Read { path: path.clone(), source })?;
            config.apply_file(&content).map_err(|source| CheckError::Config { path, source })?;
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_file(&mut self, content: &str) -> Result<(), serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        if let Some(design_doc) = file.design_doc {
            self.design_doc = design_doc;
        }
        if let Some(modules_dir) = file.modules_dir {
            self.modules_dir = modules_dir;
        }
        if let Some(log_dir) = file.log_dir {
            self.log_dir = log_dir;
        }
        if let Some(required_files) = file.required_files {
            self.required_files = required_files;
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("SPEC_CHECKER_DESIGN_DOC") {
            self.design_doc = PathBuf::from(v);
        }
        if let Some(v) = non_empty("SPEC_CHECKER_MODULES_DIR") {
            self.modules_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty("SPEC_CHECKER_LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
    }
}
