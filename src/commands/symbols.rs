//! `spec-checker symbols` command.

use std::path::Path;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::config::{CheckerConfig, CHECKER_LOG_FILE};
use crate::context::ServiceContext;
use crate::error::error_chain;
use crate::symbols::{PythonExtractor, SymbolExtractor};

/// Print the symbols extracted from `file`, one per line.
///
/// A relative `file` is resolved against `root`.
///
/// # Errors
///
/// Returns an error string if the file is not a Python source or cannot be
/// read or parsed.
pub fn run(root: &Path, file: &Path) -> Result<(), String> {
    let extractor = PythonExtractor;
    let supported = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extractor.extensions().contains(&ext));
    if !supported {
        return Err(format!("unsupported file type: {}", file.display()));
    }

    let config = CheckerConfig::load(&LiveFileSystem, root).map_err(|e| error_chain(&e))?;
    let ctx = ServiceContext::live(&root.join(&config.log_dir), CHECKER_LOG_FILE);

    let symbols = extractor.parse_symbols(&ctx, &root.join(file)).map_err(|e| {
        let rendered = error_chain(&e);
        ctx.log.error(&format!("code extractor: {rendered}"));
        rendered
    })?;

    if symbols.is_empty() {
        println!("No symbols found in {}.", file.display());
    }
    for symbol in &symbols {
        println!("{symbol}");
    }
    Ok(())
}
