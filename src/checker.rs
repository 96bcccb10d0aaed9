//! Compliance driver: runs every check against a project root.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compare::{compare, format_report, suggest_updates};
use crate::config::CheckerConfig;
use crate::context::ServiceContext;
use crate::design_doc::{find_missing_paths, parse_design_doc};
use crate::imports::check_imports;
use crate::symbols::{extract_symbols, ModuleSymbolMap};

/// Outcome of one compliance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    /// When the run started.
    pub checked_at: DateTime<Utc>,
    /// Findings that fail the run.
    pub errors: Vec<String>,
    /// Findings that are reported but never fail the run.
    pub warnings: Vec<String>,
}

impl ComplianceReport {
    fn new(checked_at: DateTime<Utc>) -> Self {
        Self { checked_at, errors: Vec::new(), warnings: Vec::new() }
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, ctx: &ServiceContext, message: String) {
        ctx.log.error(&message);
        self.errors.push(message);
    }

    fn warning(&mut self, ctx: &ServiceContext, message: String) {
        ctx.log.warning(&message);
        self.warnings.push(message);
    }

    /// Human-readable rendering: errors first, then warnings.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for e in &self.errors {
            lines.push(format!("ERROR: {e}"));
        }
        for w in &self.warnings {
            lines.push(format!("WARNING: {w}"));
        }
        if self.passed() {
            lines.push(if self.warnings.is_empty() {
                "All checks passed.".to_string()
            } else {
                format!("Checks passed with {} warning(s).", self.warnings.len())
            });
        } else {
            lines.push(format!("Checks failed with {} error(s).", self.errors.len()));
        }
        lines.join("\n")
    }
}

/// Runs the compliance checks for the project at `root`.
///
/// Missing required files are errors and stop the run before any other
/// check. Every later finding is a warning. All findings are also written to
/// the context's log sink.
#[must_use]
pub fn run_checks(ctx: &ServiceContext, root: &Path, config: &CheckerConfig) -> ComplianceReport {
    let mut report = ComplianceReport::new(ctx.clock.now());
    ctx.log.info(&format!("compliance check started in {}", root.display()));

    for required in &config.required_files {
        if !ctx.fs.exists(&root.join(required)) {
            report.error(ctx, format!("required file missing: {}", required.display()));
        }
    }
    if !report.passed() {
        return report;
    }

    let design_doc = root.join(&config.design_doc);
    let modules_dir = root.join(&config.modules_dir);

    let spec = parse_design_doc(ctx, &design_doc);
    let mut actual = ModuleSymbolMap::new();
    for module in spec.keys() {
        let relative = config.modules_dir.join(format!("{module}.py"));
        let path = root.join(&relative);
        if ctx.fs.exists(&path) {
            actual.insert(module.clone(), extract_symbols(ctx, &path));
        } else {
            report.warning(ctx, format!("module file not found: {}", relative.display()));
        }
    }

    let diffs = compare(&spec, &actual);
    for line in format_report(&diffs).lines() {
        report.warning(ctx, line.to_string());
    }
    for block in suggest_updates(&config.design_doc, &diffs).split("\n\n") {
        if !block.is_empty() {
            report.warning(ctx, block.to_string());
        }
    }

    for path in find_missing_paths(ctx, &design_doc, root) {
        report.warning(ctx, format!("referenced path does not exist: {path}"));
    }

    for finding in check_imports(ctx, &modules_dir) {
        report.warning(ctx, finding);
    }

    ctx.log.info(&format!(
        "compliance check finished: {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    ));
    report
}
