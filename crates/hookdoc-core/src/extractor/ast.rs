//! Closed expression model used for statement-level matching.
//!
//! The concrete syntax tree is lowered into a deliberately small set of
//! variants: a call with a resolved callee, an assignment wrapping another
//! expression, and everything else as verbatim source text. The matcher in
//! [`crate::extractor::hooks`] pattern-matches exhaustively over this set
//! and unwraps at most one assignment layer — arbitrary wrapping depth is
//! intentionally not modeled.

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::Node;

static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A lowered expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Call(CallExpr),
    /// An assignment; only the right-hand side is retained.
    Assign(Box<Expr>),
    /// Any other expression, kept as re-serialized source text.
    Other(String),
}

/// A lowered call expression.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Callee,
    /// Call arguments as re-serialized source text, in order.
    pub args: Vec<String>,
}

/// The callee of a call expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Callee {
    /// A plain unqualified function name.
    Name(String),
    /// Anything else: qualified names, method calls, callables held in
    /// variables. Kept as source text; never matched.
    Dynamic(String),
}

/// The source text backing a node.
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Re-serialize a node single-line: trims and collapses internal whitespace
/// runs, so multi-line call sites render as one-line argument strings.
pub fn render_source(node: Node<'_>, source: &str) -> String {
    collapse_whitespace(node_text(node, source))
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text.trim(), " ").into_owned()
}

/// Lower a tree-sitter expression node into the closed model.
pub fn lower_expression(node: Node<'_>, source: &str) -> Expr {
    match node.kind() {
        "function_call_expression" => {
            let callee = match node.child_by_field_name("function") {
                Some(callee) if callee.kind() == "name" => {
                    Callee::Name(node_text(callee, source).to_string())
                }
                Some(callee) => Callee::Dynamic(render_source(callee, source)),
                None => Callee::Dynamic(String::new()),
            };
            let mut args = Vec::new();
            if let Some(arguments) = node.child_by_field_name("arguments") {
                let mut cursor = arguments.walk();
                for child in arguments.named_children(&mut cursor) {
                    if child.kind() == "argument" {
                        args.push(render_source(child, source));
                    }
                }
            }
            Expr::Call(CallExpr { callee, args })
        }
        "assignment_expression" => match node.child_by_field_name("right") {
            Some(rhs) => Expr::Assign(Box::new(lower_expression(rhs, source))),
            None => Expr::Other(render_source(node, source)),
        },
        _ => Expr::Other(render_source(node, source)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
