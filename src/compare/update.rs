//! Suggested design-document edits.

use std::path::Path;

use super::report::join;
use super::ModuleDiff;

/// Suggests how the design document at `design_doc` should change.
///
/// Each module with undocumented symbols gets a block of bullets to add under
/// its heading; each module with missing symbols gets an attention line.
/// Blocks are separated by a blank line. The document itself is not touched.
#[must_use]
pub fn suggest_updates(design_doc: &Path, diffs: &[ModuleDiff]) -> String {
    let mut blocks = Vec::new();
    for diff in diffs {
        if !diff.undocumented.is_empty() {
            let mut block = vec![format!(
                "Suggested addition to {} under modules/{}.py:",
                design_doc.display(),
                diff.module
            )];
            block.extend(diff.undocumented.iter().map(|sym| format!("- `{sym}`")));
            blocks.push(block.join("\n"));
        }
        if !diff.missing.is_empty() {
            blocks.push(format!(
                "Attention: unimplemented in modules/{}.py: {}",
                diff.module,
                join(&diff.missing)
            ));
        }
    }
    blocks.join("\n\n")
}
