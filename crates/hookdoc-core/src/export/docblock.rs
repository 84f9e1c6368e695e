//! DocBlock export: parsed comments to canonical records.
//!
//! The summary becomes a single line. The extended description is re-flowed
//! in three phases: newlines inside `<pre><code>…</code></pre>` spans are
//! protected with a sentinel, soft-wrapped single line breaks are merged
//! into spaces while blank-line paragraph breaks survive verbatim, and the
//! sentinel is restored. Tags are exported through an explicit per-kind
//! capability match — each kind populates exactly the optional fields it
//! exposes.

use std::sync::LazyLock;

use regex::Regex;

use crate::docblock::{DocBlock, DocTag};
use crate::models::{DocBlockRecord, TagRecord};

static NEWLINE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\r]+").unwrap());

/// Temporary stand-in for protected newlines; does not occur in natural text.
const NEWLINE_SENTINEL: &str = "{{{{{}}}}}";

const CODE_OPEN: &str = "<pre><code>";
const CODE_CLOSE: &str = "</code></pre>";

/// Export a parsed docblock, or the empty record when none exists.
///
/// Absence of documentation is never an error.
pub fn export_docblock(doc: Option<&DocBlock>) -> DocBlockRecord {
    let Some(doc) = doc else {
        return DocBlockRecord::empty();
    };
    DocBlockRecord {
        description: collapse_newlines(&doc.summary),
        long_description: fix_newlines(&doc.description),
        tags: doc.tags.iter().map(export_tag).collect(),
    }
}

/// Collapse newline runs to single spaces.
pub fn collapse_newlines(text: &str) -> String {
    NEWLINE_RUN_RE.replace_all(text, " ").into_owned()
}

/// Re-flow manually soft-wrapped text while keeping code spans verbatim.
pub fn fix_newlines(text: &str) -> String {
    let protected = protect_code_spans(text);
    let merged = merge_soft_breaks(&protected);
    merged.replace(NEWLINE_SENTINEL, "\n")
}

/// Replace newlines inside `<pre><code>…</code></pre>` spans with the
/// sentinel token. Each span is protected independently; an unterminated
/// span is left untouched.
fn protect_code_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open_at) = rest.find(CODE_OPEN) {
        let content_start = open_at + CODE_OPEN.len();
        let Some(content_len) = rest[content_start..].find(CODE_CLOSE) else {
            break;
        };
        let content_end = content_start + content_len;
        out.push_str(&rest[..content_start]);
        out.push_str(&rest[content_start..content_end].replace('\n', NEWLINE_SENTINEL));
        out.push_str(CODE_CLOSE);
        rest = &rest[content_end + CODE_CLOSE.len()..];
    }
    out.push_str(rest);
    out
}

/// Merge soft-wrapped line breaks into spaces.
///
/// A newline adjacent to another newline (ignoring intervening horizontal
/// whitespace on the lookahead side) is part of a paragraph break and is
/// kept; a solitary newline becomes a single space.
fn merge_soft_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, &c) in chars.iter().enumerate() {
        if c != '\n' {
            out.push(c);
            continue;
        }
        let preceded = idx > 0 && chars[idx - 1] == '\n';
        let mut ahead = idx + 1;
        while ahead < chars.len() && (chars[ahead] == ' ' || chars[ahead] == '\t') {
            ahead += 1;
        }
        let followed = ahead < chars.len() && chars[ahead] == '\n';
        if preceded || followed {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    out
}

/// Export one tag per its kind's capability set.
fn export_tag(tag: &DocTag) -> TagRecord {
    match tag {
        DocTag::Param {
            types,
            variable,
            description,
        } => TagRecord {
            name: "param".to_string(),
            content: Some(collapse_newlines(description)),
            types: Some(types.clone()),
            variable: Some(canonical_variable(variable.as_deref())),
            ..TagRecord::default()
        },
        DocTag::Return { types, description } => TagRecord {
            name: "return".to_string(),
            content: Some(collapse_newlines(description)),
            types: Some(types.clone()),
            ..TagRecord::default()
        },
        DocTag::Var {
            types,
            variable,
            description,
        } => TagRecord {
            name: "var".to_string(),
            content: Some(collapse_newlines(description)),
            types: Some(types.clone()),
            variable: Some(canonical_variable(variable.as_deref())),
            ..TagRecord::default()
        },
        DocTag::Since {
            version,
            description,
        } => export_version_tag("since", version, description),
        DocTag::Deprecated {
            version,
            description,
        } => export_version_tag("deprecated", version, description),
        DocTag::Link { link, description } => TagRecord {
            name: "link".to_string(),
            content: Some(collapse_newlines(description)),
            link: Some(link.clone()),
            ..TagRecord::default()
        },
        DocTag::See {
            reference,
            description,
        } => TagRecord {
            name: "see".to_string(),
            content: Some(collapse_newlines(description)),
            refers: Some(reference.clone()),
            ..TagRecord::default()
        },
        DocTag::Uses {
            reference,
            description,
        } => TagRecord {
            name: "uses".to_string(),
            content: Some(collapse_newlines(description)),
            refers: Some(reference.clone()),
            ..TagRecord::default()
        },
        DocTag::Other { name, content } => TagRecord {
            name: name.clone(),
            content: Some(collapse_newlines(content)),
            ..TagRecord::default()
        },
    }
}

/// Version-style tags put the version string in `content`; the description
/// is stored separately, and only when non-empty both can be present at
/// once.
fn export_version_tag(name: &str, version: &str, description: &str) -> TagRecord {
    let description = collapse_newlines(description);
    let content = if version.is_empty() {
        description.clone()
    } else {
        version.to_string()
    };
    TagRecord {
        name: name.to_string(),
        content: Some(content),
        description: if description.is_empty() {
            None
        } else {
            Some(description)
        },
        ..TagRecord::default()
    }
}

/// Ensure the variable name carries its `$` sigil.
fn canonical_variable(variable: Option<&str>) -> String {
    match variable {
        None | Some("") => String::new(),
        Some(name) if name.starts_with('$') => name.to_string(),
        Some(name) => format!("${name}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
