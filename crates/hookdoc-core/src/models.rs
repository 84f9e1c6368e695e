//! Shared typed records forming the export contract of the entity graph.
//!
//! Field declaration order is load-bearing: serde serializes struct fields
//! in order, and the order of keys in the emitted records is part of the
//! compatibility surface consumed by downstream renderers. The `hooks` key
//! of [`FileRecord`] is conditional — it is omitted entirely, not emitted as
//! an empty list, when a file produced no hooks.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Closed enums
// ---------------------------------------------------------------------------

/// The kind of a detected hook call site.
///
/// Exactly six values exist; the detector maps each of the six recognized
/// registration functions onto one of these and nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    Filter,
    FilterReference,
    FilterDeprecated,
    Action,
    ActionReference,
    ActionDeprecated,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Filter => "filter",
            HookKind::FilterReference => "filter_reference",
            HookKind::FilterDeprecated => "filter_deprecated",
            HookKind::Action => "action",
            HookKind::ActionReference => "action_reference",
            HookKind::ActionDeprecated => "action_deprecated",
        }
    }
}

/// The four source-inclusion statement forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
        }
    }
}

/// Member visibility. Declarations without an explicit modifier are public.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

// ---------------------------------------------------------------------------
// 1. DocBlockRecord / TagRecord
// ---------------------------------------------------------------------------

/// Canonical form of a documentation comment.
///
/// Every exported entity carries one of these; a missing comment yields the
/// empty record rather than an absent key.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DocBlockRecord {
    /// Summary line, internal newlines collapsed to single spaces.
    pub description: String,
    /// Extended description, re-flowed (soft wraps merged, code spans kept
    /// verbatim).
    pub long_description: String,
    pub tags: Vec<TagRecord>,
}

impl DocBlockRecord {
    /// The record exported for an undocumented entity.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One structured annotation inside a docblock.
///
/// Optional fields are populated per tag kind: `types`/`variable` for
/// parameter-style tags, `link` for link tags, `refers` for reference tags,
/// and for version-style tags `content` holds the version string while
/// `description` is present only when non-empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TagRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refers: Option<String>,
}

// ---------------------------------------------------------------------------
// 2. ArgumentRecord
// ---------------------------------------------------------------------------

/// A declared parameter of a function or method.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArgumentRecord {
    /// Parameter name including the `$` sigil.
    pub name: String,
    /// Default value as written in source; `None` when the parameter has no
    /// default.
    pub default: Option<String>,
    /// Declared type in string form; empty when undeclared, `|`-joined for
    /// unions.
    #[serde(rename = "type")]
    pub kind: String,
}

// ---------------------------------------------------------------------------
// 3. IncludeRecord / ConstantRecord
// ---------------------------------------------------------------------------

/// A file-inclusion statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncludeRecord {
    /// The included path expression, rendered as source text.
    pub name: String,
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: IncludeKind,
}

/// A file-level constant declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConstantRecord {
    pub name: String,
    pub line: u32,
    /// Literal value as written in source.
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// 4. HookRecord
// ---------------------------------------------------------------------------

/// A detected hook call site.
///
/// `arguments` holds the call arguments after the name argument, each
/// re-serialized as source text rather than evaluated — two spellings of the
/// same runtime value remain distinct.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HookRecord {
    /// Canonical hook name; variable segments appear as `{$var}` placeholders.
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "type")]
    pub kind: HookKind,
    pub arguments: Vec<String>,
    pub doc: DocBlockRecord,
}

// ---------------------------------------------------------------------------
// 5. PropertyRecord / MethodRecord / FunctionRecord
// ---------------------------------------------------------------------------

/// A declared class property.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub default: Option<String>,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: Visibility,
    pub doc: DocBlockRecord,
}

/// A declared class method.
///
/// `namespace` is the empty string when the enclosing class is not
/// namespaced; functions default to `"global"` instead. The asymmetry is
/// part of the output contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub namespace: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: Visibility,
    pub arguments: Vec<ArgumentRecord>,
    pub doc: DocBlockRecord,
}

/// A declared free function.
///
/// Free functions cannot carry class modifiers, so the modifier fields are
/// the fixed defaults; the shape matches [`MethodRecord`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    /// Derived namespace; `"global"` when the function is not namespaced.
    pub namespace: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: Visibility,
    pub arguments: Vec<ArgumentRecord>,
    pub doc: DocBlockRecord,
}

// ---------------------------------------------------------------------------
// 6. ClassRecord
// ---------------------------------------------------------------------------

/// A declared class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassRecord {
    pub name: String,
    /// Derived namespace; `"global"` when the class is not namespaced.
    pub namespace: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Parent class name; empty string when the class extends nothing.
    pub extends: String,
    pub implements: Vec<String>,
    pub properties: Vec<PropertyRecord>,
    pub methods: Vec<MethodRecord>,
    pub doc: DocBlockRecord,
}

// ---------------------------------------------------------------------------
// 7. FileRecord
// ---------------------------------------------------------------------------

/// The exported record for one source file.
///
/// Key order is fixed: `file`, `path`, `root`, `includes`, `constants`,
/// `hooks` (only when hooks were found), `functions`, `classes`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileRecord {
    /// The file-level docblock.
    pub file: DocBlockRecord,
    /// Path relative to the project root.
    pub path: String,
    /// The project root as declared by the caller.
    pub root: String,
    pub includes: Vec<IncludeRecord>,
    pub constants: Vec<ConstantRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Vec<HookRecord>>,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_file_record(hooks: Option<Vec<HookRecord>>) -> FileRecord {
        FileRecord {
            file: DocBlockRecord::empty(),
            path: "src/plugin.php".to_string(),
            root: "/project".to_string(),
            includes: vec![],
            constants: vec![],
            hooks,
            functions: vec![],
            classes: vec![],
        }
    }

    #[test]
    fn test_hook_kind_serializes_snake_case() {
        let json = serde_json::to_string(&HookKind::FilterReference).unwrap();
        assert_eq!(json, "\"filter_reference\"");
        let json = serde_json::to_string(&HookKind::ActionDeprecated).unwrap();
        assert_eq!(json, "\"action_deprecated\"");
    }

    #[test]
    fn test_hook_kind_as_str_matches_serialization() {
        for kind in [
            HookKind::Filter,
            HookKind::FilterReference,
            HookKind::FilterDeprecated,
            HookKind::Action,
            HookKind::ActionReference,
            HookKind::ActionDeprecated,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_include_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&IncludeKind::RequireOnce).unwrap(),
            "\"require_once\""
        );
    }

    #[test]
    fn test_visibility_serialization() {
        assert_eq!(
            serde_json::to_string(&Visibility::Protected).unwrap(),
            "\"protected\""
        );
    }

    #[test]
    fn test_hooks_key_omitted_when_none() {
        let json = serde_json::to_string(&minimal_file_record(None)).unwrap();
        assert!(!json.contains("\"hooks\""));
    }

    #[test]
    fn test_hooks_key_present_when_some() {
        let record = minimal_file_record(Some(vec![HookRecord {
            name: "init".to_string(),
            line: 3,
            end_line: 3,
            kind: HookKind::Action,
            arguments: vec![],
            doc: DocBlockRecord::empty(),
        }]));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"hooks\""));
        assert!(json.contains("\"type\":\"action\""));
    }

    #[test]
    fn test_file_record_key_order() {
        let json = serde_json::to_string(&minimal_file_record(Some(vec![]))).unwrap();
        let keys = [
            "\"file\"",
            "\"path\"",
            "\"root\"",
            "\"includes\"",
            "\"constants\"",
            "\"hooks\"",
            "\"functions\"",
            "\"classes\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        for pair in positions.windows(2) {
            assert!(pair[0] < pair[1], "keys out of order in {json}");
        }
    }

    #[test]
    fn test_tag_record_optional_fields_omitted() {
        let tag = TagRecord {
            name: "todo".to_string(),
            content: Some("remove".to_string()),
            ..TagRecord::default()
        };
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "{\"name\":\"todo\",\"content\":\"remove\"}");
    }

    #[test]
    fn test_empty_docblock_record() {
        let doc = DocBlockRecord::empty();
        assert_eq!(doc.description, "");
        assert_eq!(doc.long_description, "");
        assert!(doc.tags.is_empty());
    }
}
