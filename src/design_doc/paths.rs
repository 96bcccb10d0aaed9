//! Path references: backtick tokens that name repository files.

use std::collections::BTreeSet;
use std::path::Path;

use super::read_document;
use crate::context::ServiceContext;
use crate::error::{error_chain, CheckResult};

/// Extensions that mark a backtick token as a path reference.
pub const PATH_EXTENSIONS: &[&str] = &[".py", ".json", ".db", ".md"];

/// Harvests path references from design-document text.
///
/// A reference is a backtick-delimited token on a single line that ends in
/// one of [`PATH_EXTENSIONS`] and does not start with `http`.
#[must_use]
pub fn extract_paths(content: &str) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for line in content.lines() {
        let segments: Vec<&str> = line.split('`').collect();
        // Odd segments sit between backticks; the last one is unterminated.
        let closed = segments.len().saturating_sub(1);
        for token in segments.iter().take(closed).skip(1).step_by(2) {
            if is_path_reference(token) {
                paths.insert((*token).to_string());
            }
        }
    }
    paths
}

fn is_path_reference(token: &str) -> bool {
    !token.starts_with("http") && PATH_EXTENSIONS.iter().any(|ext| token.ends_with(ext))
}

/// Returns the document's path references that do not exist under `root`.
///
/// # Errors
///
/// Returns an error when the document cannot be read or decoded.
pub fn try_find_missing_paths(
    ctx: &ServiceContext,
    design_doc: &Path,
    root: &Path,
) -> CheckResult<BTreeSet<String>> {
    let content = read_document(ctx, design_doc)?;
    Ok(extract_paths(&content).into_iter().filter(|p| !ctx.fs.exists(&root.join(p))).collect())
}

/// Returns the document's path references that do not exist under `root`.
///
/// A failure to read the document is logged and yields the empty set.
#[must_use]
pub fn find_missing_paths(
    ctx: &ServiceContext,
    design_doc: &Path,
    root: &Path,
) -> BTreeSet<String> {
    try_find_missing_paths(ctx, design_doc, root).unwrap_or_else(|e| {
        ctx.log.error(&format!("path checker: {}", error_chain(&e)));
        BTreeSet::new()
    })
}
