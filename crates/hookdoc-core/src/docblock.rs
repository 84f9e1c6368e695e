//! Documentation-comment tokenizer.
//!
//! Parses a raw `/** … */` comment into a [`DocBlock`]: a summary, an
//! extended description, and a list of structured tags. Tag kinds are a
//! closed set — each supported kind is one [`DocTag`] variant carrying only
//! the fields that kind exposes, and everything else lands in
//! [`DocTag::Other`] uninterpreted.

use std::sync::LazyLock;

use regex::Regex;

/// A parsed documentation comment, prior to export.
///
/// `summary` and `description` keep their source newlines; re-flowing is the
/// exporter's concern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocBlock {
    pub summary: String,
    pub description: String,
    pub tags: Vec<DocTag>,
}

/// One structured tag. Variants carry only the fields their kind supports.
#[derive(Clone, Debug, PartialEq)]
pub enum DocTag {
    Param {
        types: Vec<String>,
        variable: Option<String>,
        description: String,
    },
    Return {
        types: Vec<String>,
        description: String,
    },
    Var {
        types: Vec<String>,
        variable: Option<String>,
        description: String,
    },
    Since {
        version: String,
        description: String,
    },
    Deprecated {
        version: String,
        description: String,
    },
    Link {
        link: String,
        description: String,
    },
    See {
        reference: String,
        description: String,
    },
    Uses {
        reference: String,
        description: String,
    },
    Other {
        name: String,
        content: String,
    },
}

impl DocTag {
    /// The tag name as written in source, without the `@`.
    pub fn name(&self) -> &str {
        match self {
            DocTag::Param { .. } => "param",
            DocTag::Return { .. } => "return",
            DocTag::Var { .. } => "var",
            DocTag::Since { .. } => "since",
            DocTag::Deprecated { .. } => "deprecated",
            DocTag::Link { .. } => "link",
            DocTag::See { .. } => "see",
            DocTag::Uses { .. } => "uses",
            DocTag::Other { name, .. } => name,
        }
    }
}

// ---------------------------------------------------------------------------
// Comment parsing
// ---------------------------------------------------------------------------

static TAG_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][A-Za-z0-9_-]*)\s*(.*)$").unwrap());

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d[\w.+-]*$").unwrap());

/// Parse a raw `/** … */` comment into a [`DocBlock`].
///
/// Never fails: malformed input degrades to an empty or partially-filled
/// block. A missing comment is represented by the caller as `None`, not by
/// calling this with an empty string.
pub fn parse(raw: &str) -> DocBlock {
    let body = strip_delimiters(raw);
    let lines: Vec<&str> = body.lines().collect();

    // Split off the tag section: the first line whose content starts a tag.
    let tag_start = lines
        .iter()
        .position(|line| TAG_LINE_RE.is_match(line.trim_start()))
        .unwrap_or(lines.len());

    let (summary, description) = split_text_block(&lines[..tag_start]);
    let tags = parse_tag_block(&lines[tag_start..]);

    DocBlock {
        summary,
        description,
        tags,
    }
}

/// Strip `/**` and `*/` delimiters and the per-line ` * ` gutter.
///
/// Only a single space after the gutter asterisk is removed, so indentation
/// inside code samples survives.
fn strip_delimiters(raw: &str) -> String {
    let text = raw.trim();
    let text = text.strip_prefix("/**").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .lines()
        .map(|line| {
            let gutter = line.trim_start();
            match gutter.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => gutter,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split the free-text block into summary and extended description.
///
/// The summary runs to the first blank line; everything after the blank run
/// is the description.
fn split_text_block(lines: &[&str]) -> (String, String) {
    let mut idx = 0;
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }

    let mut summary_lines = Vec::new();
    while idx < lines.len() && !lines[idx].trim().is_empty() {
        summary_lines.push(lines[idx]);
        idx += 1;
    }
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }

    let description: Vec<&str> = lines[idx..].to_vec();
    (
        summary_lines.join("\n").trim().to_string(),
        description.join("\n").trim_end().to_string(),
    )
}

/// Group tag lines with their continuation lines and parse each group.
fn parse_tag_block(lines: &[&str]) -> Vec<DocTag> {
    let mut tags = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in lines {
        let content = line.trim_start();
        if let Some(caps) = TAG_LINE_RE.captures(content) {
            if let Some((name, body)) = current.take() {
                tags.push(parse_tag(&name, body.trim()));
            }
            current = Some((caps[1].to_string(), caps[2].to_string()));
        } else if let Some((_, body)) = current.as_mut() {
            // Continuation line of the previous tag.
            body.push('\n');
            body.push_str(content);
        }
    }
    if let Some((name, body)) = current.take() {
        tags.push(parse_tag(&name, body.trim()));
    }
    tags
}

// ---------------------------------------------------------------------------
// Per-kind tag content parsing
// ---------------------------------------------------------------------------

fn parse_tag(name: &str, content: &str) -> DocTag {
    match name {
        "param" => {
            let (types, variable, description) = parse_typed_variable(content);
            DocTag::Param {
                types,
                variable,
                description,
            }
        }
        "return" | "returns" => {
            let (first, rest) = take_token(content);
            DocTag::Return {
                types: split_type_list(first),
                description: rest.to_string(),
            }
        }
        "var" => {
            let (types, variable, description) = parse_typed_variable(content);
            DocTag::Var {
                types,
                variable,
                description,
            }
        }
        "since" => {
            let (version, description) = parse_version(content);
            DocTag::Since {
                version,
                description,
            }
        }
        "deprecated" => {
            let (version, description) = parse_version(content);
            DocTag::Deprecated {
                version,
                description,
            }
        }
        "link" => {
            let (link, rest) = take_token(content);
            DocTag::Link {
                link: link.to_string(),
                description: rest.to_string(),
            }
        }
        "see" => {
            let (reference, rest) = take_token(content);
            DocTag::See {
                reference: reference.to_string(),
                description: rest.to_string(),
            }
        }
        "uses" => {
            let (reference, rest) = take_token(content);
            DocTag::Uses {
                reference: reference.to_string(),
                description: rest.to_string(),
            }
        }
        _ => DocTag::Other {
            name: name.to_string(),
            content: content.to_string(),
        },
    }
}

/// Parse `[type] [$variable] [description]` as used by `@param` and `@var`.
///
/// Either the type or the variable may come first; a `$`-led token is always
/// the variable.
fn parse_typed_variable(content: &str) -> (Vec<String>, Option<String>, String) {
    let (first, rest) = take_token(content);
    if first.is_empty() {
        return (Vec::new(), None, String::new());
    }
    if first.starts_with('$') {
        return (Vec::new(), Some(first.to_string()), rest.to_string());
    }
    let types = split_type_list(first);
    let (second, tail) = take_token(rest);
    if second.starts_with('$') {
        (types, Some(second.to_string()), tail.to_string())
    } else {
        (types, None, rest.to_string())
    }
}

/// Parse `[version] [description]` as used by `@since` and `@deprecated`.
///
/// The first token is treated as a version only when it looks like a version
/// vector; otherwise the whole content is the description.
fn parse_version(content: &str) -> (String, String) {
    let (first, rest) = take_token(content);
    if VERSION_RE.is_match(first) {
        (first.to_string(), rest.to_string())
    } else {
        (String::new(), content.to_string())
    }
}

/// Split an aggregate type expression into its member names, in order.
pub fn split_type_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Take the first whitespace-delimited token, returning `(token, remainder)`.
fn take_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
