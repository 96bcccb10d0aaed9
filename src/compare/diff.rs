//! Set differences between documented and implemented symbols.

use serde::Serialize;

use crate::symbols::{ModuleSymbolMap, SymbolSet};

/// Differences for one documented module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDiff {
    /// Module name, the file stem of `modules/<name>.py`.
    pub module: String,
    /// Documented but not found in code.
    pub missing: SymbolSet,
    /// Found in code but not documented.
    pub undocumented: SymbolSet,
}

impl ModuleDiff {
    /// True when code and document agree on this module.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.undocumented.is_empty()
    }
}

/// Compares documented symbols against extracted ones.
///
/// One record per module of `spec`, in module order. A module absent from
/// `actual` counts as having no symbols; modules only in `actual` are not
/// reported.
#[must_use]
pub fn compare(spec: &ModuleSymbolMap, actual: &ModuleSymbolMap) -> Vec<ModuleDiff> {
    let empty = SymbolSet::new();
    spec.iter()
        .map(|(module, documented)| {
            let found = actual.get(module).unwrap_or(&empty);
            ModuleDiff {
                module: module.clone(),
                missing: documented.difference(found).cloned().collect(),
                undocumented: found.difference(documented).cloned().collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SymbolSet {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn map(entries: &[(&str, &[&str])]) -> ModuleSymbolMap {
        entries.iter().map(|(m, syms)| ((*m).to_string(), set(syms))).collect()
    }

    #[test]
    fn reports_missing_and_undocumented() {
        let spec = map(&[("mod", &["foo", "bar"])]);
        let actual = map(&[("mod", &["foo", "baz"])]);

        let diffs = compare(&spec, &actual);
        assert_eq!(
            diffs,
            vec![ModuleDiff {
                module: "mod".to_string(),
                missing: set(&["bar"]),
                undocumented: set(&["baz"]),
            }]
        );
        assert!(diffs[0].missing.is_disjoint(&diffs[0].undocumented));
    }

    #[test]
    fn module_absent_from_code_misses_everything() {
        let diffs = compare(&map(&[("ghost", &["Ghost", "Ghost.walk"])]), &ModuleSymbolMap::new());
        assert_eq!(diffs[0].missing, set(&["Ghost", "Ghost.walk"]));
        assert!(diffs[0].undocumented.is_empty());
    }

    #[test]
    fn code_only_modules_are_ignored() {
        let spec = map(&[("a", &["x"])]);
        let actual = map(&[("a", &["x"]), ("b", &["y"])]);
        let diffs = compare(&spec, &actual);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].is_consistent());
    }

    #[test]
    fn output_follows_module_order() {
        let spec: ModuleSymbolMap =
            ["zeta", "alpha", "mid"].iter().map(|m| ((*m).to_string(), SymbolSet::new())).collect();
        let names: Vec<String> =
            compare(&spec, &ModuleSymbolMap::new()).into_iter().map(|d| d.module).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
