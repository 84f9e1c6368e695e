//! Entity export: parsed files to canonical output records.
//!
//! Walks a [`ParsedFile`] and assembles one [`FileRecord`] with the fixed
//! key order of the output contract. Siblings are never reordered; every
//! list is emitted in source order as discovered during the parse.

use std::path::Path;

use crate::export::docblock::export_docblock;
use crate::extractor::filesystem::relative_path;
use crate::extractor::parser::{
    ParsedArgument, ParsedClass, ParsedFile, ParsedFunction, ParsedMethod, ParsedProperty,
};
use crate::models::{
    ArgumentRecord, ClassRecord, ConstantRecord, FileRecord, FunctionRecord, IncludeRecord,
    MethodRecord, PropertyRecord, Visibility,
};

/// Derive the namespace of a fully-qualified name: split on the namespace
/// separator and drop the last segment. A bare name yields the empty string.
pub fn namespace_of(fq_name: &str) -> String {
    match fq_name.rsplit_once('\\') {
        Some((namespace, _)) => namespace.to_string(),
        None => String::new(),
    }
}

/// Map an empty derived namespace to the `"global"` placeholder.
///
/// Applied to classes and functions only; methods keep the empty string.
fn or_global(namespace: String) -> String {
    if namespace.is_empty() {
        "global".to_string()
    } else {
        namespace
    }
}

/// Export one parsed file against the declared project root.
pub fn export_file(parsed: &ParsedFile, root: &Path) -> FileRecord {
    FileRecord {
        file: export_docblock(parsed.doc.as_ref()),
        path: relative_path(&parsed.path, root),
        root: root.display().to_string(),
        includes: parsed
            .includes
            .iter()
            .map(|include| IncludeRecord {
                name: include.name.clone(),
                line: include.line,
                kind: include.kind,
            })
            .collect(),
        constants: parsed
            .constants
            .iter()
            .map(|constant| ConstantRecord {
                name: constant.name.clone(),
                line: constant.line,
                value: constant.value.clone(),
            })
            .collect(),
        hooks: if parsed.hooks.is_empty() {
            None
        } else {
            Some(parsed.hooks.clone())
        },
        functions: parsed.functions.iter().map(export_function).collect(),
        classes: parsed.classes.iter().map(export_class).collect(),
    }
}

fn export_function(function: &ParsedFunction) -> FunctionRecord {
    FunctionRecord {
        name: function.name.clone(),
        namespace: or_global(namespace_of(&function.fq_name)),
        line: function.line,
        end_line: function.end_line,
        is_final: false,
        is_abstract: false,
        is_static: false,
        visibility: Visibility::Public,
        arguments: function.arguments.iter().map(export_argument).collect(),
        doc: export_docblock(function.doc.as_ref()),
    }
}

fn export_class(class: &ParsedClass) -> ClassRecord {
    ClassRecord {
        name: class.name.clone(),
        namespace: or_global(namespace_of(&class.fq_name)),
        line: class.line,
        end_line: class.end_line,
        is_final: class.is_final,
        is_abstract: class.is_abstract,
        extends: class.extends.clone().unwrap_or_default(),
        implements: class.implements.clone(),
        properties: class.properties.iter().map(export_property).collect(),
        methods: class.methods.iter().map(export_method).collect(),
        doc: export_docblock(class.doc.as_ref()),
    }
}

fn export_method(method: &ParsedMethod) -> MethodRecord {
    MethodRecord {
        name: method.name.clone(),
        // Methods keep an empty namespace when the enclosing class is not
        // namespaced; they do not fall back to "global" like functions do.
        namespace: method.namespace.clone(),
        line: method.line,
        end_line: method.end_line,
        is_final: method.is_final,
        is_abstract: method.is_abstract,
        is_static: method.is_static,
        visibility: method.visibility,
        arguments: method.arguments.iter().map(export_argument).collect(),
        doc: export_docblock(method.doc.as_ref()),
    }
}

fn export_property(property: &ParsedProperty) -> PropertyRecord {
    PropertyRecord {
        name: property.name.clone(),
        line: property.line,
        end_line: property.end_line,
        default: property.default.clone(),
        is_static: property.is_static,
        visibility: property.visibility,
        doc: export_docblock(property.doc.as_ref()),
    }
}

fn export_argument(argument: &ParsedArgument) -> ArgumentRecord {
    ArgumentRecord {
        name: argument.name.clone(),
        default: argument.default.clone(),
        kind: argument.type_name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
