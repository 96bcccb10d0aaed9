//! Layout rules tree-sitter's error recovery lets through.
//!
//! tree-sitter-python builds a clean tree for some sources the Python
//! compiler rejects: suites that are empty or not indented, dedents to an
//! unknown level, tab/space mixes that only nest one way at tab size 8, and
//! a few Python 2 forms. [`check_layout`] finds the first such violation.
//!
//! Indentation is measured twice, with tabs expanded to 8 columns and to 1
//! column. Two indents compare consistently only if both measures agree.

use std::cmp::Ordering;
use std::fmt;

use tree_sitter::Node;

use super::{line_of, named_children};

/// Kind of layout violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFault {
    /// A statement is indented deeper than its suite.
    UnexpectedIndent,
    /// A compound statement has no indented body.
    ExpectedIndentedBlock,
    /// A dedent lands between two known indentation levels.
    UnindentMismatch,
    /// Nesting depends on how wide a tab is.
    InconsistentTabs,
    /// `print x`, `exec code`, `except E, e` or `<>`.
    Python2Syntax,
    /// A backtick outside strings and comments.
    Backtick,
}

impl LayoutFault {
    /// Message in the wording of the Python compiler.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnexpectedIndent => "unexpected indent",
            Self::ExpectedIndentedBlock => "expected an indented block",
            Self::UnindentMismatch => "unindent does not match any outer indentation level",
            Self::InconsistentTabs => "inconsistent use of tabs and spaces in indentation",
            Self::Python2Syntax => "Python 2 syntax",
            Self::Backtick => "invalid character '`'",
        }
    }
}

impl fmt::Display for LayoutFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First layout violation and the 1-based line it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutViolation {
    /// What is wrong.
    pub fault: LayoutFault,
    /// Where.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Indent {
    tab8: usize,
    tab1: usize,
}

impl Indent {
    const ZERO: Self = Self { tab8: 0, tab1: 0 };

    /// `None` when the two tab widths disagree on the ordering.
    fn compare(self, other: Self) -> Option<Ordering> {
        let wide = self.tab8.cmp(&other.tab8);
        (wide == self.tab1.cmp(&other.tab1)).then_some(wide)
    }
}

/// Returns the first layout violation in a tree free of error nodes.
#[must_use]
pub fn check_layout(source: &str, root: Node<'_>) -> Option<LayoutViolation> {
    let lines: Vec<&str> = source.split('\n').collect();
    visit(&lines, root).or_else(|| stray_backtick(source, root))
}

fn violation(fault: LayoutFault, line: usize) -> Option<LayoutViolation> {
    Some(LayoutViolation { fault, line })
}

fn visit(lines: &[&str], node: Node<'_>) -> Option<LayoutViolation> {
    let found = match node.kind() {
        "module" => check_suite(lines, node, None),
        "block" => check_block(lines, node),
        "print_statement" | "exec_statement" => violation(LayoutFault::Python2Syntax, line_of(node)),
        "except_clause" if has_comma_target(node) => {
            violation(LayoutFault::Python2Syntax, line_of(node))
        }
        "<>" if !node.is_named() => violation(LayoutFault::Python2Syntax, line_of(node)),
        kind if SUITE_OWNERS.contains(&kind) && !has_block(node) => {
            violation(LayoutFault::ExpectedIndentedBlock, line_of(node))
        }
        _ => None,
    };
    if found.is_some() {
        return found;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| visit(lines, child))
}

/// Statements and clauses that must own a suite.
const SUITE_OWNERS: &[&str] = &[
    "function_definition",
    "class_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "finally_clause",
    "with_statement",
    "case_clause",
];

fn has_block(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "block");
    found
}

/// `except E, e:` binds with a comma instead of `as`.
fn has_comma_target(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| matches!(c.kind(), "," | "expression_list"));
    found
}

fn check_block(lines: &[&str], block: Node<'_>) -> Option<LayoutViolation> {
    let header = block.parent()?;
    if statements(block).is_empty() {
        return violation(LayoutFault::ExpectedIndentedBlock, line_of(header));
    }
    let at = header.start_position();
    // A header sharing its line with other code leaves only the suite's own
    // consistency to check.
    check_suite(lines, block, indent_at(lines, at.row, at.column))
}

/// Checks that every statement starting a line sits at the suite's indent.
///
/// A module's suite sits at column 0. A block's suite must be deeper than
/// its header, `outer`.
fn check_suite(
    lines: &[&str],
    suite: Node<'_>,
    outer: Option<Indent>,
) -> Option<LayoutViolation> {
    let is_module = suite.kind() == "module";
    let mut expected = is_module.then_some(Indent::ZERO);

    for statement in statements(suite) {
        let at = statement.start_position();
        let Some(indent) = indent_at(lines, at.row, at.column) else {
            // Not first on its line: a simple suite or a `;` sequence.
            continue;
        };
        let line = at.row + 1;
        match expected {
            None => {
                if let Some(outer) = outer {
                    match indent.compare(outer) {
                        None => return violation(LayoutFault::InconsistentTabs, line),
                        Some(Ordering::Greater) => {}
                        Some(_) => return violation(LayoutFault::ExpectedIndentedBlock, line),
                    }
                }
                expected = Some(indent);
            }
            Some(level) => match indent.compare(level) {
                None => return violation(LayoutFault::InconsistentTabs, line),
                Some(Ordering::Equal) => {}
                Some(Ordering::Less) => return violation(LayoutFault::UnindentMismatch, line),
                Some(Ordering::Greater) => return violation(LayoutFault::UnexpectedIndent, line),
            },
        }
    }
    None
}

fn statements(suite: Node<'_>) -> Vec<Node<'_>> {
    named_children(suite)
        .into_iter()
        .filter(|n| !matches!(n.kind(), "comment" | "line_continuation"))
        .collect()
}

/// Indentation before `column` on `row`, or `None` if anything but
/// whitespace precedes it.
fn indent_at(lines: &[&str], row: usize, column: usize) -> Option<Indent> {
    let prefix = lines.get(row)?.as_bytes().get(..column)?;
    let mut indent = Indent::ZERO;
    for &byte in prefix {
        match byte {
            b' ' => {
                indent.tab8 += 1;
                indent.tab1 += 1;
            }
            b'\t' => {
                indent.tab8 = (indent.tab8 / 8 + 1) * 8;
                indent.tab1 += 1;
            }
            // Form feed resets the column.
            0x0c => indent = Indent::ZERO,
            _ => return None,
        }
    }
    Some(indent)
}

fn stray_backtick(source: &str, root: Node<'_>) -> Option<LayoutViolation> {
    source.match_indices('`').find_map(|(offset, _)| {
        let node = root.descendant_for_byte_range(offset, offset + 1)?;
        let quoted = std::iter::successors(Some(node), Node::parent)
            .any(|n| matches!(n.kind(), "string" | "comment"));
        (!quoted).then(|| LayoutViolation {
            fault: LayoutFault::Backtick,
            line: node.start_position().row + 1,
        })
    })
}
