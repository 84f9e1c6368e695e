//! Hook name normalization.
//!
//! The name argument of a hook call is frequently not a static string but a
//! concatenation of literal and variable segments. This module reconstructs
//! a canonical, human-readable identifier from the re-serialized source text
//! of that argument. Three rules apply in order, first match wins:
//!
//! 1. a single uniformly-quoted string literal is unquoted;
//! 2. an optional quoted literal, a variable reference, and an optional
//!    quoted literal joined by `.` become `prefix{$var}suffix`;
//! 3. anything else is returned unchanged.
//!
//! Rule 2 is a full anchored match on purpose: expressions with more than
//! two concatenation operators, function calls, or conditionals fall through
//! to the verbatim fallback instead of being partially rewritten.

use std::sync::LazyLock;

use regex::Regex;

static LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:'([^']*)'|"([^"]*)")\s*$"#).unwrap());

static CONCAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ^\s*
        (?: (?: '([^']*)' | "([^"]*)" ) \s* \. \s* )?      # optional literal prefix
        ( \$\w+ (?: ->\w+ | \[ [^\]]* \] )* )              # variable reference
        (?: \s* \. \s* (?: '([^']*)' | "([^"]*)" ) )?      # optional literal suffix
        \s*$
        "#,
    )
    .unwrap()
});

/// Produce the canonical name for a hook from the re-serialized source text
/// of its name argument.
pub fn normalize_hook_name(raw: &str) -> String {
    if let Some(content) = unquote_literal(raw) {
        return content;
    }
    if let Some(caps) = CONCAT_RE.captures(raw) {
        let prefix = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        let variable = &caps[3];
        let suffix = caps.get(4).or_else(|| caps.get(5)).map_or("", |m| m.as_str());
        return format!("{prefix}{{{variable}}}{suffix}");
    }
    raw.to_string()
}

/// Unquote the input when it is exactly one quoted string literal.
pub fn unquote_literal(raw: &str) -> Option<String> {
    LITERAL_RE.captures(raw).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map_or(String::new(), |m| m.as_str().to_string())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
