//! `find_duplicate_functions` command.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::cli::DuplicateArgs;
use crate::config::{CheckerConfig, DUPLICATES_LOG_FILE};
use crate::context::ServiceContext;
use crate::duplicates::{find_duplicates, format_duplicate_report};
use crate::error::{error_chain, CheckError};

/// Scan for duplicated top-level functions and print the report.
///
/// Logs go to the configured log directory below the current directory.
///
/// # Errors
///
/// Returns an error string if the target is missing, the pattern is invalid,
/// the output file cannot be written, or any duplicate was found.
pub fn run(args: &DuplicateArgs) -> Result<(), String> {
    let root = Path::new(".");
    let config = CheckerConfig::load(&LiveFileSystem, root).map_err(|e| error_chain(&e))?;
    let ctx = ServiceContext::live(&root.join(&config.log_dir), DUPLICATES_LOG_FILE);

    let report = find_duplicates(&ctx, &args.target, &args.pattern, args.recursive).map_err(|e| {
        let rendered = error_chain(&e);
        ctx.log.error(&rendered);
        rendered
    })?;

    let rendered = format_duplicate_report(&report);
    println!("{rendered}");

    if let Some(output) = &args.output {
        ctx.fs
            .write(output, &format!("{rendered}\n"))
            .map_err(|source| error_chain(&CheckError::Write { path: output.clone(), source }))?;
        ctx.log.info(&format!("report written to {}", output.display()));
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!("duplicate functions found in {} file(s)", report.files.len()))
    }
}
