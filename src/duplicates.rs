//! Duplicate top-level function detection.
//!
//! A module that defines the same function name twice at top level keeps only
//! the last definition; the earlier one is dead code that still reads as live.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use serde::Serialize;

use crate::context::ServiceContext;
use crate::error::{error_chain, CheckError, CheckResult};
use crate::python::{definition_of, line_of, named_children, read_and_parse, ParsedModule};

/// Glob applied to file names when none is given.
pub const DEFAULT_PATTERN: &str = "*.py";

/// Closing advice printed after any duplicate listing.
pub const REMEDIATION_NOTE: &str = "Each top-level function must be defined exactly once per module. \
Rename or delete the extra definitions: Python keeps only the last one, so the earlier bodies never run.";

/// Symbol name to the ascending lines where it is defined.
pub type DuplicateSymbols = BTreeMap<String, Vec<usize>>;

/// Result of scanning a file or directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    /// Number of files that were parsed successfully.
    pub scanned: usize,
    /// Files with at least one duplicated top-level function.
    pub files: BTreeMap<PathBuf, DuplicateSymbols>,
}

impl DuplicateReport {
    /// True when no duplicate was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

/// Top-level function names defined more than once in `module`.
///
/// Only direct children of the module count; decorated and `async`
/// definitions are included, class bodies and nested scopes are not.
#[must_use]
pub fn duplicates_in_module(module: &ParsedModule) -> DuplicateSymbols {
    let mut seen = DuplicateSymbols::new();
    for child in named_children(module.root()) {
        let def = definition_of(child);
        if def.kind() != "function_definition" {
            continue;
        }
        if let Some(name) = module.name_of(def) {
            seen.entry(name.to_string()).or_default().push(line_of(def));
        }
    }
    seen.retain(|_, lines| lines.len() > 1);
    seen
}

/// Scans `target` for duplicated top-level functions.
///
/// A file target is scanned as is. A directory target contributes the files
/// whose path relative to it matches `pattern` with gitignore glob rules: a
/// pattern without `/` matches file names at any depth, one with `/` is
/// anchored at the target. Subdirectories are only entered when `recursive`
/// is set. Unparseable files are logged and skipped.
///
/// # Errors
///
/// Returns an error when the target does not exist, the pattern is not a
/// valid glob, or the directory cannot be listed.
pub fn find_duplicates(
    ctx: &ServiceContext,
    target: &Path,
    pattern: &str,
    recursive: bool,
) -> CheckResult<DuplicateReport> {
    if !ctx.fs.exists(target) {
        return Err(CheckError::MissingTarget { path: target.to_path_buf() });
    }

    let files = if ctx.fs.is_dir(target) {
        let matcher = file_matcher(target, pattern)?;
        candidate_files(ctx, target, recursive)?
            .into_iter()
            .filter(|path| {
                let relative = path.strip_prefix(target).unwrap_or(path);
                matcher.matched(relative, false).is_whitelist()
            })
            .collect()
    } else {
        vec![target.to_path_buf()]
    };

    let mut report = DuplicateReport::default();
    for path in files {
        let module = match read_and_parse(ctx, &path) {
            Ok(module) => module,
            Err(e) => {
                ctx.log.error(&format!("duplicate detector: {}", error_chain(&e)));
                continue;
            }
        };
        report.scanned += 1;
        let dups = duplicates_in_module(&module);
        if !dups.is_empty() {
            for (name, lines) in &dups {
                ctx.log.error(&format!(
                    "{}: function '{name}' defined {} times (lines {})",
                    path.display(),
                    lines.len(),
                    join_lines(lines)
                ));
            }
            report.files.insert(path, dups);
        }
    }

    ctx.log.info(&format!(
        "duplicate scan of {} finished: {} file(s) scanned, {} with duplicates",
        target.display(),
        report.scanned,
        report.files.len()
    ));
    Ok(report)
}

fn file_matcher(root: &Path, pattern: &str) -> CheckResult<Override> {
    let to_err = |source| CheckError::Pattern { pattern: pattern.to_string(), source };
    let mut builder = OverrideBuilder::new(root);
    builder.add(pattern).map_err(to_err)?;
    builder.build().map_err(to_err)
}

fn candidate_files(ctx: &ServiceContext, dir: &Path, recursive: bool) -> CheckResult<Vec<PathBuf>> {
    let to_err = |source| CheckError::List { path: dir.to_path_buf(), source };
    if recursive {
        return ctx.fs.list_files_recursive(dir).map_err(to_err);
    }
    let names = ctx.fs.list_dir(dir).map_err(to_err)?;
    Ok(names.into_iter().map(|n| dir.join(n)).filter(|p| !ctx.fs.is_dir(p)).collect())
}

fn join_lines(lines: &[usize]) -> String {
    lines.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Renders the report for the console or the `--output` file.
#[must_use]
pub fn format_duplicate_report(report: &DuplicateReport) -> String {
    if report.is_clean() {
        return format!(
            "No duplicate function definitions found ({} file(s) scanned).",
            report.scanned
        );
    }

    let mut lines = vec!["Duplicate function definitions found:".to_string()];
    for (path, dups) in &report.files {
        lines.push(String::new());
        lines.push(path.display().to_string());
        for (name, at) in dups {
            lines.push(format!("  {name}: lines {}", join_lines(at)));
        }
    }
    lines.push(String::new());
    lines.push(REMEDIATION_NOTE.to_string());
    lines.join("\n")
}
