//! Human-readable discrepancy report.

use super::ModuleDiff;
use crate::symbols::SymbolSet;

/// Renders one line per non-empty difference set.
///
/// Consistent modules contribute nothing, so the empty string means code and
/// document agree.
#[must_use]
pub fn format_report(diffs: &[ModuleDiff]) -> String {
    let mut lines = Vec::new();
    for diff in diffs {
        if !diff.missing.is_empty() {
            lines.push(format!(
                "Module '{}': documented but not implemented: {}",
                diff.module,
                join(&diff.missing)
            ));
        }
        if !diff.undocumented.is_empty() {
            lines.push(format!(
                "Module '{}': implemented but not documented: {}",
                diff.module,
                join(&diff.undocumented)
            ));
        }
    }
    lines.join("\n")
}

pub(super) fn join(symbols: &SymbolSet) -> String {
    symbols.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(module: &str, missing: &[&str], undocumented: &[&str]) -> ModuleDiff {
        ModuleDiff {
            module: module.to_string(),
            missing: missing.iter().map(|s| (*s).to_string()).collect(),
            undocumented: undocumented.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn lists_sorted_symbols_per_module() {
        let report = format_report(&[diff("mod", &["zed", "bar"], &["baz"])]);
        assert_eq!(
            report,
            "Module 'mod': documented but not implemented: bar, zed\n\
             Module 'mod': implemented but not documented: baz"
        );
    }

    #[test]
    fn consistent_modules_render_nothing() {
        assert_eq!(format_report(&[diff("a", &[], &[]), diff("b", &[], &[])]), "");
        assert_eq!(format_report(&[]), "");
    }

    #[test]
    fn rendering_is_idempotent() {
        let diffs = vec![diff("a", &["x"], &[]), diff("b", &[], &["Y.z"])];
        assert_eq!(format_report(&diffs), format_report(&diffs));
    }
}
