//! Module sections: which symbols the document claims each module exposes.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::read_document;
use crate::context::ServiceContext;
use crate::error::{error_chain, CheckResult};
use crate::symbols::ModuleSymbolMap;

const SECTION_MARKER: &str = "## ";

static MODULE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"modules/(\w+)\.py").expect("module path pattern is valid"));

static SYMBOL_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- `([^`]*)`").expect("symbol bullet pattern is valid"));

/// Parses module sections out of design-document text.
///
/// Sections for the same module merge. Indented bullets, empty backtick
/// pairs and lines outside a section are ignored.
#[must_use]
pub fn parse_sections(content: &str) -> ModuleSymbolMap {
    let mut map = ModuleSymbolMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if line.starts_with(SECTION_MARKER) {
            current = MODULE_PATH.captures(line).map(|caps| caps[1].to_string());
            if let Some(module) = &current {
                map.entry(module.clone()).or_default();
            }
            continue;
        }

        let Some(module) = &current else {
            continue;
        };
        if let Some(caps) = SYMBOL_BULLET.captures(line) {
            let symbol = caps[1].trim();
            if !symbol.is_empty() {
                map.entry(module.clone()).or_default().insert(symbol.to_string());
            }
        }
    }

    map
}

/// Reads and parses the design document at `path`, propagating failures.
///
/// # Errors
///
/// Returns an error when the document cannot be read or decoded.
pub fn try_parse_design_doc(ctx: &ServiceContext, path: &Path) -> CheckResult<ModuleSymbolMap> {
    read_document(ctx, path).map(|content| parse_sections(&content))
}

/// Reads and parses the design document at `path`.
///
/// A failure is logged and yields the empty map.
#[must_use]
pub fn parse_design_doc(ctx: &ServiceContext, path: &Path) -> ModuleSymbolMap {
    try_parse_design_doc(ctx, path).unwrap_or_else(|e| {
        ctx.log.error(&format!("spec parser: {}", error_chain(&e)));
        ModuleSymbolMap::new()
    })
}
