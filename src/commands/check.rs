//! `spec-checker check` command.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::checker::run_checks;
use crate::config::{CheckerConfig, CHECKER_LOG_FILE};
use crate::context::ServiceContext;
use crate::error::error_chain;

/// Execute the compliance check for the project at `root`.
///
/// Prints the report (or its JSON form) to stdout.
///
/// # Errors
///
/// Returns an error string if the configuration is invalid or the check
/// recorded errors.
pub fn run(root: &Path, json: bool) -> Result<(), String> {
    let config = CheckerConfig::load(&LiveFileSystem, root).map_err(|e| error_chain(&e))?;
    let ctx = ServiceContext::live(&root.join(&config.log_dir), CHECKER_LOG_FILE);
    tracing::debug!(root = %root.display(), ?config, "running compliance check");

    let report = run_checks(&ctx, root, &config);
    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        println!("{rendered}");
    } else {
        println!("{}", report.render());
    }

    if report.passed() {
        Ok(())
    } else {
        Err(format!("compliance check failed with {} error(s)", report.errors.len()))
    }
}
