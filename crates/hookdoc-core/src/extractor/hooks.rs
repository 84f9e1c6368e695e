//! Hook call-site detection and extraction.
//!
//! Hooks are not declared by syntax: they are recognized by matching a bare
//! expression statement — or an assignment whose right-hand side is a call —
//! against six known registration functions. Matching is syntactic and
//! shallow; aliased or re-exported callees are not followed.

use crate::docblock::DocBlock;
use crate::errors::{HookdocError, HookdocResult};
use crate::export::docblock::export_docblock;
use crate::extractor::ast::{CallExpr, Callee, Expr};
use crate::extractor::normalize::normalize_hook_name;
use crate::models::{HookKind, HookRecord};

/// The six recognized registration functions and the kind each maps to.
///
/// The mapping is total: every entry has a kind, and no other callee name
/// ever matches.
pub const HOOK_FUNCTIONS: &[(&str, HookKind)] = &[
    ("apply_filters", HookKind::Filter),
    ("apply_filters_ref_array", HookKind::FilterReference),
    ("apply_filters_deprecated", HookKind::FilterDeprecated),
    ("do_action", HookKind::Action),
    ("do_action_ref_array", HookKind::ActionReference),
    ("do_action_deprecated", HookKind::ActionDeprecated),
];

/// Look up the hook kind for a callee name. Exact matches only.
pub fn hook_kind(name: &str) -> Option<HookKind> {
    HOOK_FUNCTIONS
        .iter()
        .find(|(function, _)| *function == name)
        .map(|(_, kind)| *kind)
}

/// Match a lowered statement expression against the recognized call shapes.
///
/// Returns the kind and the call when the expression is a direct call, or
/// an assignment whose right-hand side is a call, to one of the six
/// registration functions. At most one assignment layer is unwrapped.
pub fn match_hook(expr: &Expr) -> Option<(HookKind, &CallExpr)> {
    let call = match expr {
        Expr::Call(call) => call,
        Expr::Assign(inner) => match inner.as_ref() {
            Expr::Call(call) => call,
            _ => return None,
        },
        Expr::Other(_) => return None,
    };
    match &call.callee {
        Callee::Name(name) => hook_kind(name).map(|kind| (kind, call)),
        Callee::Dynamic(_) => None,
    }
}

/// Extract a [`HookRecord`] from a matched call.
///
/// The first positional argument is the raw name expression; the remaining
/// arguments are stored verbatim, in order. A matched call with no
/// arguments violates the contract of all six registration functions and is
/// a hard parse error.
pub fn extract_hook(
    kind: HookKind,
    call: &CallExpr,
    line: u32,
    end_line: u32,
    doc: Option<&DocBlock>,
) -> HookdocResult<HookRecord> {
    let (name_expr, rest) = call.args.split_first().ok_or_else(|| {
        HookdocError::Parse(format!(
            "{} call at line {line} is missing its name argument",
            kind.as_str()
        ))
    })?;

    Ok(HookRecord {
        name: normalize_hook_name(name_expr),
        line,
        end_line,
        kind,
        arguments: rest.to_vec(),
        doc: export_docblock(doc),
    })
}

/// Per-file hook accumulator.
///
/// One context is created per parsed file, written during the single
/// statement traversal, and consumed exactly once by the exporter.
#[derive(Debug, Default)]
pub struct HookContext {
    hooks: Vec<HookRecord>,
}

impl HookContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, hook: HookRecord) {
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Consume the context, yielding the hooks in source order.
    pub fn finish(self) -> Vec<HookRecord> {
        self.hooks
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
