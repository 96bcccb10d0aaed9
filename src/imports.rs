//! Relative-import detection for the modules directory.
//!
//! Modules are loaded by file path from the entry point, so a relative import
//! inside them resolves against no package and fails at runtime.

use std::path::Path;

use tree_sitter::Node;

use crate::context::ServiceContext;
use crate::error::{error_chain, CheckError, CheckResult};
use crate::python::{line_of, named_children, read_and_parse, ParsedModule};

/// Scans every `*.py` file directly inside `dir`, propagating a listing
/// failure.
///
/// Files that fail to read or parse are logged and contribute nothing.
///
/// # Errors
///
/// Returns [`CheckError::List`] when `dir` cannot be listed.
pub fn try_check_imports(ctx: &ServiceContext, dir: &Path) -> CheckResult<Vec<String>> {
    let names = ctx
        .fs
        .list_dir(dir)
        .map_err(|source| CheckError::List { path: dir.to_path_buf(), source })?;

    let mut warnings = Vec::new();
    for name in names.iter().filter(|n| n.ends_with(".py")) {
        let path = dir.join(name);
        if ctx.fs.is_dir(&path) {
            continue;
        }
        match read_and_parse(ctx, &path) {
            Ok(module) => warnings.extend(relative_imports(&module, name)),
            Err(e) => ctx.log.error(&format!("import checker: {}", error_chain(&e))),
        }
    }
    Ok(warnings)
}

/// Scans every `*.py` file directly inside `dir` for relative imports.
///
/// A listing failure is logged and yields no warnings.
#[must_use]
pub fn check_imports(ctx: &ServiceContext, dir: &Path) -> Vec<String> {
    try_check_imports(ctx, dir).unwrap_or_else(|e| {
        ctx.log.error(&format!("import checker: {}", error_chain(&e)));
        Vec::new()
    })
}

/// Warnings for every relative import anywhere in `module`, in source order.
///
/// `file_name` tags each warning.
#[must_use]
pub fn relative_imports(module: &ParsedModule, file_name: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    visit(module, module.root(), file_name, &mut warnings);
    warnings
}

fn visit(module: &ParsedModule, node: Node<'_>, file_name: &str, out: &mut Vec<String>) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                let text = module.text(name);
                if text.starts_with('.') {
                    out.push(format!(
                        "{file_name}: relative import 'import {text}' (line {})",
                        line_of(node)
                    ));
                }
            }
        }
        "import_from_statement" => {
            if let Some(source) = node.child_by_field_name("module_name") {
                if source.kind() == "relative_import" || module.text(source).starts_with('.') {
                    out.push(format!(
                        "{file_name}: relative import 'from {}' (line {})",
                        module.text(source),
                        line_of(node)
                    ));
                }
            }
        }
        _ => {
            for child in named_children(node) {
                visit(module, child, file_name, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryFileSystem, MemoryLogSink};
    use crate::ports::log::LogLevel;

    fn ctx_with(files: &[(&str, &str)]) -> (ServiceContext, MemoryLogSink) {
        let fs = files.iter().fold(MemoryFileSystem::new(), |fs, (p, c)| fs.with_file(p, c));
        let log = MemoryLogSink::new();
        (ServiceContext::in_memory_with_log(fs, log.clone()), log)
    }

    #[test]
    fn flags_both_relative_forms() {
        let (ctx, _) = ctx_with(&[(
            "/proj/modules/sample.py",
            "import os\nfrom . import foo\nfrom .bar import baz\n",
        )]);

        let warnings = check_imports(&ctx, Path::new("/proj/modules"));
        assert_eq!(
            warnings,
            vec![
                "sample.py: relative import 'from .' (line 2)",
                "sample.py: relative import 'from .bar' (line 3)",
            ]
        );
        for w in &warnings {
            assert!(w.starts_with("sample.py"));
            assert!(w.contains("relative"));
        }
    }

    #[test]
    fn absolute_imports_are_clean() {
        let (ctx, _) = ctx_with(&[(
            "/proj/modules/clean.py",
            "import os.path\nimport json as j\nfrom modules import util\nfrom __future__ import annotations\n",
        )]);
        assert!(check_imports(&ctx, Path::new("/proj/modules")).is_empty());
    }

    #[test]
    fn finds_imports_nested_in_functions() {
        let (ctx, _) = ctx_with(&[(
            "/proj/modules/lazy.py",
            "def load():\n    from ..pkg.mod import thing\n    return thing\n",
        )]);
        assert_eq!(
            check_imports(&ctx, Path::new("/proj/modules")),
            vec!["lazy.py: relative import 'from ..pkg.mod' (line 2)"]
        );
    }

    #[test]
    fn scans_files_in_name_order_and_skips_subdirectories() {
        let (ctx, _) = ctx_with(&[
            ("/proj/modules/b.py", "from .x import y\n"),
            ("/proj/modules/a.py", "from .z import w\n"),
            ("/proj/modules/notes.txt", "from . import nothing\n"),
            ("/proj/modules/pkg/inner.py", "from . import ignored\n"),
        ]);
        let warnings = check_imports(&ctx, Path::new("/proj/modules"));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("a.py"));
        assert!(warnings[1].starts_with("b.py"));
    }

    #[test]
    fn broken_file_is_logged_and_skipped() {
        let (ctx, log) = ctx_with(&[
            ("/proj/modules/broken.py", "from . import (\n"),
            ("/proj/modules/ok.py", "from .a import b\n"),
        ]);
        let warnings = check_imports(&ctx, Path::new("/proj/modules"));
        assert_eq!(warnings, vec!["ok.py: relative import 'from .a' (line 1)"]);
        assert_eq!(log.at_level(LogLevel::Error).len(), 1);
    }

    #[test]
    fn missing_directory_is_logged() {
        let (ctx, log) = ctx_with(&[]);
        assert!(check_imports(&ctx, Path::new("/proj/modules")).is_empty());
        assert_eq!(log.at_level(LogLevel::Error).len(), 1);
        assert!(try_check_imports(&ctx, Path::new("/proj/modules")).is_err());
    }
}
