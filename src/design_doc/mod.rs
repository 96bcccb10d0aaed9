//! Design-document readers.
//!
//! The design document is plain text with two recognised conventions:
//!
//! ```text
//! ## Tag storage (modules/tag_manager.py)
//! - `TagManager`
//! - `TagManager.add_tag`
//!
//! Settings live in `config/settings.json`.
//! ```
//!
//! Level-2 headings naming `modules/<name>.py` open module sections whose
//! backtick bullets list that module's symbols. Backtick tokens ending in a
//! known extension anywhere in the document are path references.

pub mod paths;
pub mod sections;

use std::path::Path;

pub use paths::{extract_paths, find_missing_paths, try_find_missing_paths, PATH_EXTENSIONS};
pub use sections::{parse_design_doc, parse_sections, try_parse_design_doc};

use crate::context::ServiceContext;
use crate::error::{CheckError, CheckResult};

/// Reads the design document through the filesystem port.
fn read_document(ctx: &ServiceContext, path: &Path) -> CheckResult<String> {
    ctx.fs
        .read_to_string(path)
        .map_err(|source| CheckError::Read { path: path.to_path_buf(), source })
}
