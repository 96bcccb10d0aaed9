//! Symbol universes: what code declares and what documents claim.
//!
//! Sets and maps are ordered so that every rendering built from them is
//! deterministic.

pub mod extract;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub use extract::{extract_symbols, symbols_in_module, try_extract_symbols, PythonExtractor, SymbolExtractor};

/// Symbol names: `func`, `Class`, or `Class.method`.
pub type SymbolSet = BTreeSet<String>;

/// Module stem (file name without extension) to its symbols.
pub type ModuleSymbolMap = BTreeMap<String, SymbolSet>;

/// Module key for a source file: its stem, e.g. `tag_manager` for
/// `modules/tag_manager.py`.
#[must_use]
pub fn module_name(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}
