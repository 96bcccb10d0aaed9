//! Python front end: tree-sitter parsing and node helpers.
//!
//! tree-sitter recovers from syntax errors instead of failing. A tree
//! containing any `ERROR` or `MISSING` node is rejected here, and so is a
//! clean tree whose layout the Python compiler would refuse (see
//! [`layout`]).

pub mod layout;

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::context::ServiceContext;
use crate::error::{CheckError, CheckResult};

/// A parsed Python module together with its source text.
pub struct ParsedModule {
    source: String,
    tree: Tree,
}

impl ParsedModule {
    /// The `module` node at the root of the tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Text of the node's `name` field, if it has one.
    #[must_use]
    pub fn name_of(&self, node: Node<'_>) -> Option<&str> {
        node.child_by_field_name("name").map(|n| self.text(n)).filter(|n| !n.is_empty())
    }
}

/// Parses Python `source`; `path` is only used for error messages.
///
/// # Errors
///
/// Returns [`CheckError::Parse`] when the source has syntax errors and
/// [`CheckError::Layout`] when its indentation or Python 2 forms would be
/// rejected by the Python compiler.
pub fn parse_source(path: &Path, source: String) -> CheckResult<ParsedModule> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| CheckError::NoTree { path: path.to_path_buf() })?;

    if let Some(bad) = first_error(tree.root_node()) {
        let at = bad.start_position();
        return Err(CheckError::Parse {
            path: path.to_path_buf(),
            line: at.row + 1,
            column: at.column + 1,
        });
    }

    if let Some(bad) = layout::check_layout(&source, tree.root_node()) {
        return Err(CheckError::Layout {
            path: path.to_path_buf(),
            line: bad.line,
            fault: bad.fault,
        });
    }

    Ok(ParsedModule { source, tree })
}

/// Reads `path` through the filesystem port and parses it.
///
/// # Errors
///
/// Returns [`CheckError::Read`] on open or UTF-8 decode failure and
/// [`CheckError::Parse`] on syntax errors.
pub fn read_and_parse(ctx: &ServiceContext, path: &Path) -> CheckResult<ParsedModule> {
    let source = ctx
        .fs
        .read_to_string(path)
        .map_err(|source| CheckError::Read { path: path.to_path_buf(), source })?;
    parse_source(path, source)
}

/// Finds the first error or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Unwraps a `decorated_definition` to the function or class it decorates.
///
/// Any other node is returned unchanged.
#[must_use]
pub fn definition_of(node: Node<'_>) -> Node<'_> {
    if node.kind() == "decorated_definition" {
        if let Some(inner) = node.child_by_field_name("definition") {
            return inner;
        }
    }
    node
}

/// 1-based line on which `node` starts.
#[must_use]
pub fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Named children of `node`, collected so callers can recurse freely.
#[must_use]
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

#[cfg(test)]
mod tests {
    use super::layout::LayoutFault;
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    #[test]
    fn parses_valid_module() {
        let module = parse_source(Path::new("a.py"), "def foo():\n    pass\n".to_string()).unwrap();
        assert_eq!(module.root().kind(), "module");
        let def = named_children(module.root())[0];
        assert_eq!(def.kind(), "function_definition");
        assert_eq!(module.name_of(def), Some("foo"));
    }

    #[test]
    fn rejects_syntax_errors_with_location() {
        let err =
            parse_source(Path::new("broken.py"), "x = 1\ndef foo(:\n    pass\n".to_string())
                .err()
                .unwrap();
        match err {
            CheckError::Parse { line, .. } => assert!(line >= 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    fn rejection(source: &str) -> CheckError {
        parse_source(Path::new("bad.py"), source.to_string()).err().unwrap()
    }

    fn is_syntax_rejection(err: &CheckError) -> bool {
        matches!(err, CheckError::Parse { .. } | CheckError::Layout { .. })
    }

    #[test]
    fn rejects_indentation_errors_tree_sitter_recovers_from() {
        let sources = [
            "def helper():\nreturn 1\n",
            "class Empty:\n",
            "def f():\n    x = 1\n  y = 2\n",
            "if True:\n    pass\n    \n        x = 1\n",
        ];
        for source in sources {
            let err = rejection(source);
            assert!(is_syntax_rejection(&err), "accepted:\n{source}");
        }
    }

    #[test]
    fn rejects_tab_width_dependent_indentation() {
        let err = rejection(
            "class Repo:\n\tdef load(self):\n\t\treturn 1\n        def save(self):\n\t\treturn 2\n",
        );
        match err {
            CheckError::Layout { line, fault, .. } => {
                assert_eq!(fault, LayoutFault::InconsistentTabs);
                assert_eq!(line, 4);
            }
            other => panic!("expected layout error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_python2_forms() {
        for source in [
            "print 'x'\n",
            "try:\n    pass\nexcept ValueError, e:\n    pass\n",
            "x = `1`\n",
        ] {
            let err = rejection(source);
            assert!(is_syntax_rejection(&err), "accepted:\n{source}");
        }
    }

    #[test]
    fn layout_error_names_the_python_message() {
        let err = rejection("print 'x'\n");
        assert_eq!(err.to_string(), "Python 2 syntax in bad.py at line 1");
    }

    #[test]
    fn unwraps_decorated_definitions() {
        let module = parse_source(
            Path::new("a.py"),
            "@cache\n@other(1)\ndef foo():\n    pass\n".to_string(),
        )
        .unwrap();
        let decorated = named_children(module.root())[0];
        assert_eq!(decorated.kind(), "decorated_definition");

        let def = definition_of(decorated);
        assert_eq!(def.kind(), "function_definition");
        assert_eq!(line_of(def), 3);
    }

    #[test]
    fn read_failure_is_reported_as_read_error() {
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new());
        let err = read_and_parse(&ctx, Path::new("/proj/missing.py")).err().unwrap();
        assert!(matches!(err, CheckError::Read { .. }));
    }
}
