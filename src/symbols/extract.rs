//! Code extractor: declared symbols of one source file.

use std::path::Path;

use tree_sitter::Node;

use super::SymbolSet;
use crate::context::ServiceContext;
use crate::error::{error_chain, CheckResult};
use crate::python::{self, definition_of, named_children, ParsedModule};

/// Extracts declared symbols from source files of one language.
pub trait SymbolExtractor {
    /// File extensions (without the dot) this extractor understands.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `path` and returns its declared symbols.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, decoded, or parsed.
    fn parse_symbols(&self, ctx: &ServiceContext, path: &Path) -> CheckResult<SymbolSet>;
}

/// Symbol extractor for Python modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonExtractor;

impl SymbolExtractor for PythonExtractor {
    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse_symbols(&self, ctx: &ServiceContext, path: &Path) -> CheckResult<SymbolSet> {
        let module = python::read_and_parse(ctx, path)?;
        Ok(symbols_in_module(&module))
    }
}

/// Extracts symbols from `path`, propagating failures.
///
/// # Errors
///
/// Returns an error when the file cannot be read, decoded, or parsed.
pub fn try_extract_symbols(ctx: &ServiceContext, path: &Path) -> CheckResult<SymbolSet> {
    PythonExtractor.parse_symbols(ctx, path)
}

/// Extracts symbols from `path`.
///
/// Any failure is logged at error level and yields the empty set.
#[must_use]
pub fn extract_symbols(ctx: &ServiceContext, path: &Path) -> SymbolSet {
    try_extract_symbols(ctx, path).unwrap_or_else(|e| {
        ctx.log.error(&format!("code extractor: {}", error_chain(&e)));
        SymbolSet::new()
    })
}

/// Collects top-level functions and classes, plus `Class.method` for every
/// function defined in a class body.
#[must_use]
pub fn symbols_in_module(module: &ParsedModule) -> SymbolSet {
    let mut symbols = SymbolSet::new();
    for child in named_children(module.root()) {
        let def = definition_of(child);
        let Some(name) = module.name_of(def) else {
            continue;
        };
        match def.kind() {
            "function_definition" => {
                symbols.insert(name.to_string());
            }
            "class_definition" => {
                symbols.insert(name.to_string());
                if let Some(body) = def.child_by_field_name("body") {
                    collect_methods(module, name, body, &mut symbols);
                }
            }
            _ => {}
        }
    }
    symbols
}

/// Walks a class body without entering function bodies. Methods of nested
/// classes are qualified with the outermost class name.
fn collect_methods(module: &ParsedModule, class: &str, node: Node<'_>, out: &mut SymbolSet) {
    for child in named_children(node) {
        let def = definition_of(child);
        if def.kind() == "function_definition" {
            if let Some(name) = module.name_of(def) {
                out.insert(format!("{class}.{name}"));
            }
        } else {
            collect_methods(module, class, def, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryFileSystem, MemoryLogSink};
    use crate::ports::log::LogLevel;
    use crate::python::parse_source;

    fn symbols(source: &str) -> Vec<String> {
        let module = parse_source(Path::new("t.py"), source.to_string()).unwrap();
        symbols_in_module(&module).into_iter().collect()
    }

    #[test]
    fn top_level_function_class_and_method() {
        let found = symbols("def foo(): pass\nclass Bar:\n    def baz(self): pass\n");
        assert_eq!(found, vec!["Bar", "Bar.baz", "foo"]);
    }

    #[test]
    fn decorators_async_and_hints_do_not_matter() {
        let found = symbols(
            "import functools\n\n\
             @functools.cache\n\
             async def fetch(url: str) -> bytes:\n    \"\"\"Doc.\"\"\"\n    return b''\n\n\
             class Repo:\n    @staticmethod\n    def open(path: str) -> 'Repo':\n        ...\n\n    \
             @property\n    def size(self) -> int:\n        return 0\n",
        );
        assert_eq!(found, vec!["Repo", "Repo.open", "Repo.size", "fetch"]);
    }

    #[test]
    fn inner_functions_are_not_emitted() {
        let found = symbols(
            "def outer():\n    def inner():\n        pass\n    return inner\n\n\
             class Widget:\n    def render(self):\n        def helper():\n            pass\n        return helper\n",
        );
        assert_eq!(found, vec!["Widget", "Widget.render", "outer"]);
    }

    #[test]
    fn conditional_methods_and_nested_classes_are_qualified_by_outer_class() {
        let found = symbols(
            "class Config:\n    if True:\n        def load(self):\n            pass\n    \
             class Meta:\n        def describe(cls):\n            pass\n",
        );
        assert_eq!(found, vec!["Config", "Config.describe", "Config.load"]);
    }

    #[test]
    fn broken_file_yields_empty_set_and_one_error() {
        let fs = MemoryFileSystem::new().with_file("/proj/modules/bad.py", "def broken(:\n");
        let log = MemoryLogSink::new();
        let ctx = ServiceContext::in_memory_with_log(fs, log.clone());

        let found = extract_symbols(&ctx, Path::new("/proj/modules/bad.py"));
        assert!(found.is_empty());

        let errors = log.at_level(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("bad.py"));
        assert_eq!(log.records().len(), 1);
    }

    #[test]
    fn badly_indented_files_yield_empty_set_and_one_error() {
        let sources = [
            ("/proj/modules/no_indent.py", "def helper():\nreturn 1\n"),
            (
                "/proj/modules/tabs.py",
                "class Repo:\n\tdef load(self):\n\t\treturn 1\n        def save(self):\n\t\treturn 2\n",
            ),
            ("/proj/modules/dedent.py", "def f():\n    x = 1\n  y = 2\n"),
            ("/proj/modules/empty.py", "class Empty:\n"),
        ];
        for (path, source) in sources {
            let log = MemoryLogSink::new();
            let ctx = ServiceContext::in_memory_with_log(
                MemoryFileSystem::new().with_file(path, source),
                log.clone(),
            );

            let found = extract_symbols(&ctx, Path::new(path));
            assert!(found.is_empty(), "{path}: {found:?}");
            assert_eq!(log.at_level(LogLevel::Error).len(), 1, "{path}");
        }
    }

    #[test]
    fn undecodable_file_yields_empty_set() {
        let fs = MemoryFileSystem::new().with_bytes("/proj/modules/latin.py", b"x = '\xe9'\n");
        let log = MemoryLogSink::new();
        let ctx = ServiceContext::in_memory_with_log(fs, log.clone());

        assert!(extract_symbols(&ctx, Path::new("/proj/modules/latin.py")).is_empty());
        assert_eq!(log.at_level(LogLevel::Error).len(), 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let source = "class B:\n    def z(self): pass\n    def a(self): pass\ndef c(): pass\n";
        assert_eq!(symbols(source), symbols(source));
    }
}
