//! PHP source parsing and declaration extraction.
//!
//! Wraps a tree-sitter parser and lowers each concrete syntax tree into a
//! [`ParsedFile`]: the file docblock, includes, constants, functions and
//! classes in source order, plus the hooks collected by the detector during
//! the same single traversal. The walk is the only pass over the tree; the
//! exporter never touches syntax nodes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tree_sitter::Node;

use crate::docblock::{self, DocBlock};
use crate::errors::{HookdocError, HookdocResult};
use crate::extractor::ast::{self, Callee, Expr};
use crate::extractor::hooks::{self, HookContext};
use crate::extractor::normalize::unquote_literal;
use crate::models::{HookRecord, IncludeKind, Visibility};

// ---------------------------------------------------------------------------
// Parsed declaration model
// ---------------------------------------------------------------------------

/// A declared parameter, pre-export.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedArgument {
    /// Name including the `$` sigil.
    pub name: String,
    pub default: Option<String>,
    /// Declared type in string form; empty when undeclared.
    pub type_name: String,
}

/// A file-inclusion statement, pre-export.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedInclude {
    pub name: String,
    pub line: u32,
    pub kind: IncludeKind,
}

/// A file-level constant, from `const` statements or `define()` calls.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedConstant {
    pub name: String,
    pub line: u32,
    pub value: Option<String>,
}

/// A free function declaration, pre-export.
#[derive(Clone, Debug)]
pub struct ParsedFunction {
    pub name: String,
    /// Fully-qualified name; equals `name` outside any namespace.
    pub fq_name: String,
    pub line: u32,
    pub end_line: u32,
    pub arguments: Vec<ParsedArgument>,
    pub doc: Option<DocBlock>,
}

/// A class property declaration, pre-export.
#[derive(Clone, Debug)]
pub struct ParsedProperty {
    pub name: String,
    pub line: u32,
    pub end_line: u32,
    pub default: Option<String>,
    pub is_static: bool,
    pub visibility: Visibility,
    pub doc: Option<DocBlock>,
}

/// A class method declaration, pre-export.
#[derive(Clone, Debug)]
pub struct ParsedMethod {
    pub name: String,
    /// Enclosing namespace; empty when the class is not namespaced.
    pub namespace: String,
    pub line: u32,
    pub end_line: u32,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    pub visibility: Visibility,
    pub arguments: Vec<ParsedArgument>,
    pub doc: Option<DocBlock>,
}

/// A class declaration, pre-export.
#[derive(Clone, Debug)]
pub struct ParsedClass {
    pub name: String,
    pub fq_name: String,
    pub line: u32,
    pub end_line: u32,
    pub is_final: bool,
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub properties: Vec<ParsedProperty>,
    pub methods: Vec<ParsedMethod>,
    pub doc: Option<DocBlock>,
}

/// One fully parsed source file. Immutable after the parse completes.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub doc: Option<DocBlock>,
    pub includes: Vec<ParsedInclude>,
    pub constants: Vec<ParsedConstant>,
    pub functions: Vec<ParsedFunction>,
    pub classes: Vec<ParsedClass>,
    /// Hooks found anywhere in the file, in source order.
    pub hooks: Vec<HookRecord>,
}

// ---------------------------------------------------------------------------
// Parser wrapper
// ---------------------------------------------------------------------------

/// Owns a tree-sitter parser configured for the source grammar. One
/// instance is reused across the files of a pipeline run.
pub struct SourceParser {
    parser: tree_sitter::Parser,
}

impl SourceParser {
    pub fn new() -> HookdocResult<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| HookdocError::Parse(format!("failed to load grammar: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse_file(&mut self, path: &Path) -> HookdocResult<ParsedFile> {
        let source = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = source.len(), "parsing source file");
        self.parse_source(&source, path)
    }

    /// Parse source text into a [`ParsedFile`]. The single traversal also
    /// runs the hook detector over every expression statement.
    pub fn parse_source(&mut self, source: &str, path: &Path) -> HookdocResult<ParsedFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| HookdocError::Parse(format!("failed to parse {}", path.display())))?;
        let root = tree.root_node();

        let mut walker = FileWalker {
            source,
            namespace: String::new(),
            includes: Vec::new(),
            constants: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            hooks: HookContext::new(),
        };
        walker.walk_children(root)?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            doc: file_docblock(root, source),
            includes: walker.includes,
            constants: walker.constants,
            functions: walker.functions,
            classes: walker.classes,
            hooks: walker.hooks.finish(),
        })
    }
}

// ---------------------------------------------------------------------------
// Declaration walk
// ---------------------------------------------------------------------------

struct FileWalker<'a> {
    source: &'a str,
    namespace: String,
    includes: Vec<ParsedInclude>,
    constants: Vec<ParsedConstant>,
    functions: Vec<ParsedFunction>,
    classes: Vec<ParsedClass>,
    hooks: HookContext,
}

impl FileWalker<'_> {
    fn walk_children(&mut self, node: Node<'_>) -> HookdocResult<()> {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            self.walk_node(child)?;
        }
        Ok(())
    }

    fn walk_node(&mut self, node: Node<'_>) -> HookdocResult<()> {
        match node.kind() {
            "namespace_definition" => self.enter_namespace(node)?,
            "function_definition" => self.extract_function(node)?,
            "class_declaration" => self.extract_class(node)?,
            "const_declaration" => self.extract_constants(node),
            "expression_statement" => self.handle_expression_statement(node)?,
            "comment" | "php_tag" | "text_interpolation" => {}
            // Control structures and other containers: recurse so that
            // nested statements (and conditionally declared entities) are
            // still discovered.
            _ => self.walk_children(node)?,
        }
        Ok(())
    }

    /// `namespace Foo;` applies to the rest of the file; `namespace Foo {}`
    /// scopes to its body.
    fn enter_namespace(&mut self, node: Node<'_>) -> HookdocResult<()> {
        let name = node
            .child_by_field_name("name")
            .map(|n| ast::node_text(n, self.source).to_string())
            .unwrap_or_default();
        match node.child_by_field_name("body") {
            Some(body) => {
                let previous = std::mem::replace(&mut self.namespace, name);
                self.walk_children(body)?;
                self.namespace = previous;
            }
            None => self.namespace = name,
        }
        Ok(())
    }

    fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}\\{}", self.namespace, name)
        }
    }

    // -- Statements ----------------------------------------------------------

    fn handle_expression_statement(&mut self, node: Node<'_>) -> HookdocResult<()> {
        let Some(expr) = node.named_child(0) else {
            return Ok(());
        };
        match expr.kind() {
            "include_expression" => self.record_include(expr, node, IncludeKind::Include),
            "include_once_expression" => self.record_include(expr, node, IncludeKind::IncludeOnce),
            "require_expression" => self.record_include(expr, node, IncludeKind::Require),
            "require_once_expression" => self.record_include(expr, node, IncludeKind::RequireOnce),
            "function_call_expression" | "assignment_expression" => {
                let lowered = ast::lower_expression(expr, self.source);
                if let Some((kind, call)) = hooks::match_hook(&lowered) {
                    let doc = preceding_docblock(node, self.source);
                    let hook = hooks::extract_hook(
                        kind,
                        call,
                        line(node),
                        end_line(node),
                        doc.as_ref(),
                    )?;
                    self.hooks.record(hook);
                } else if let Expr::Call(call) = &lowered {
                    if matches!(&call.callee, Callee::Name(name) if name == "define") {
                        self.record_define(call.args.as_slice(), line(node));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn record_include(&mut self, expr: Node<'_>, statement: Node<'_>, kind: IncludeKind) {
        let name = expr
            .named_child(0)
            .map(|path| ast::render_source(path, self.source))
            .unwrap_or_default();
        self.includes.push(ParsedInclude {
            name,
            line: line(statement),
            kind,
        });
    }

    fn record_define(&mut self, args: &[String], line: u32) {
        let Some(name_arg) = args.first() else {
            warn!(line, "define() call without a name argument, skipping");
            return;
        };
        let name = unquote_literal(name_arg).unwrap_or_else(|| name_arg.clone());
        self.constants.push(ParsedConstant {
            name,
            line,
            value: args.get(1).cloned(),
        });
    }

    fn extract_constants(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for element in node.named_children(&mut cursor) {
            if element.kind() != "const_element" {
                continue;
            }
            let name = element
                .named_child(0)
                .map(|n| ast::node_text(n, self.source).to_string())
                .unwrap_or_default();
            let value = element
                .named_child(1)
                .map(|n| ast::render_source(n, self.source));
            self.constants.push(ParsedConstant {
                name,
                line: line(element),
                value,
            });
        }
    }

    // -- Declarations --------------------------------------------------------

    fn extract_function(&mut self, node: Node<'_>) -> HookdocResult<()> {
        let name = self.field_text(node, "name");
        let function = ParsedFunction {
            fq_name: self.qualify(&name),
            name,
            line: line(node),
            end_line: end_line(node),
            arguments: self.extract_parameters(node),
            doc: preceding_docblock(node, self.source),
        };
        self.functions.push(function);
        // Hooks fire from inside function bodies; keep walking.
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body)?;
        }
        Ok(())
    }

    fn extract_class(&mut self, node: Node<'_>) -> HookdocResult<()> {
        let name = self.field_text(node, "name");
        let mut class = ParsedClass {
            fq_name: self.qualify(&name),
            name,
            line: line(node),
            end_line: end_line(node),
            is_final: has_child_kind(node, "final_modifier"),
            is_abstract: has_child_kind(node, "abstract_modifier"),
            extends: None,
            implements: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            doc: preceding_docblock(node, self.source),
        };

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "base_clause" => {
                    class.extends = child
                        .named_child(0)
                        .map(|parent| ast::node_text(parent, self.source).to_string());
                }
                "class_interface_clause" => {
                    let mut interfaces = child.walk();
                    class.implements.extend(
                        child
                            .named_children(&mut interfaces)
                            .map(|interface| ast::node_text(interface, self.source).to_string()),
                    );
                }
                _ => {}
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            let members: Vec<Node<'_>> = body.named_children(&mut cursor).collect();
            for member in members {
                match member.kind() {
                    "method_declaration" => {
                        let method = self.extract_method(member)?;
                        class.methods.push(method);
                    }
                    "property_declaration" => self.extract_properties(member, &mut class),
                    _ => {}
                }
            }
        }

        self.classes.push(class);
        Ok(())
    }

    fn extract_method(&mut self, node: Node<'_>) -> HookdocResult<ParsedMethod> {
        let method = ParsedMethod {
            name: self.field_text(node, "name"),
            namespace: self.namespace.clone(),
            line: line(node),
            end_line: end_line(node),
            is_final: has_child_kind(node, "final_modifier"),
            is_abstract: has_child_kind(node, "abstract_modifier"),
            is_static: has_child_kind(node, "static_modifier"),
            visibility: visibility_of(node, self.source),
            arguments: self.extract_parameters(node),
            doc: preceding_docblock(node, self.source),
        };
        // Hooks fire from inside method bodies too; abstract methods have
        // no body node.
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body)?;
        }
        Ok(method)
    }

    fn extract_properties(&mut self, node: Node<'_>, class: &mut ParsedClass) {
        let is_static = has_child_kind(node, "static_modifier");
        let visibility = visibility_of(node, self.source);
        let doc = preceding_docblock(node, self.source);

        let mut cursor = node.walk();
        for element in node.named_children(&mut cursor) {
            if element.kind() != "property_element" {
                continue;
            }
            let name = element
                .named_child(0)
                .map(|n| ast::node_text(n, self.source).to_string())
                .unwrap_or_default();
            let default = element
                .named_child(1)
                .map(|n| ast::render_source(n, self.source));
            class.properties.push(ParsedProperty {
                name,
                line: line(node),
                end_line: end_line(node),
                default,
                is_static,
                visibility,
                doc: doc.clone(),
            });
        }
    }

    fn extract_parameters(&self, declaration: Node<'_>) -> Vec<ParsedArgument> {
        let Some(parameters) = declaration.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut arguments = Vec::new();
        let mut cursor = parameters.walk();
        for parameter in parameters.named_children(&mut cursor) {
            match parameter.kind() {
                "simple_parameter" | "variadic_parameter" | "property_promotion_parameter" => {
                    let name = parameter
                        .child_by_field_name("name")
                        .map(|n| ast::node_text(n, self.source).to_string())
                        .unwrap_or_default();
                    if name.is_empty() {
                        continue;
                    }
                    arguments.push(ParsedArgument {
                        name,
                        default: parameter
                            .child_by_field_name("default_value")
                            .map(|n| ast::render_source(n, self.source)),
                        type_name: parameter
                            .child_by_field_name("type")
                            .map(|n| ast::render_source(n, self.source))
                            .unwrap_or_default(),
                    });
                }
                _ => {}
            }
        }
        arguments
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| ast::node_text(n, self.source).to_string())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

fn end_line(node: Node<'_>) -> u32 {
    node.end_position().row as u32 + 1
}

fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn visibility_of(node: Node<'_>, source: &str) -> Visibility {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "visibility_modifier" {
            return match ast::node_text(child, source) {
                "private" => Visibility::Private,
                "protected" => Visibility::Protected,
                _ => Visibility::Public,
            };
        }
    }
    Visibility::Public
}

/// The documentation comment directly preceding a node, if any.
fn preceding_docblock(node: Node<'_>, source: &str) -> Option<DocBlock> {
    let previous = node.prev_named_sibling()?;
    if previous.kind() != "comment" {
        return None;
    }
    let text = ast::node_text(previous, source);
    text.starts_with("/**").then(|| docblock::parse(text))
}

/// The file-level docblock: the first `/**` comment in the file, unless a
/// structural declaration directly follows and claims it.
fn file_docblock(root: Node<'_>, source: &str) -> Option<DocBlock> {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "php_tag" => continue,
            "comment" => {
                let text = ast::node_text(child, source);
                if !text.starts_with("/**") {
                    continue;
                }
                let claimed = matches!(
                    child.next_named_sibling().map(|n| n.kind()),
                    Some(
                        "function_definition"
                            | "class_declaration"
                            | "interface_declaration"
                            | "trait_declaration"
                            | "enum_declaration"
                    )
                );
                return if claimed {
                    None
                } else {
                    Some(docblock::parse(text))
                };
            }
            _ => return None,
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HookKind;

    fn parse(source: &str) -> ParsedFile {
        let mut parser = SourceParser::new().unwrap();
        parser
            .parse_source(source, Path::new("src/plugin.php"))
            .unwrap()
    }

    const PLUGIN_SOURCE: &str = r#"<?php
/**
 * Plugin bootstrap file.
 *
 * Wires the widget registry together.
 */

require_once __DIR__ . '/includes/registry.php';
include 'helpers.php';

define( 'WIDGET_VERSION', '2.1.0' );
const WIDGET_SLUG = 'widget';

/**
 * Registers a widget type.
 *
 * @param string $name Widget name.
 * @param array  $args Optional arguments.
 * @return bool True on success.
 */
function register_widget_type( $name, array $args = array() ) {
    /**
     * Filters the arguments of a widget type.
     *
     * @param array  $args Arguments.
     * @param string $name Widget name.
     */
    $args = apply_filters( 'widget_type_args', $args, $name );

    /** Fires after a widget type is registered. */
    do_action( 'registered_widget_type_' . $name, $args );

    return true;
}

/**
 * Central widget lookup.
 */
class Widget_Registry extends Base_Registry implements Countable, ArrayAccess {
    /**
     * Registered widgets, keyed by slug.
     *
     * @var array
     */
    public static $widgets = array();

    private $locked = false;

    /**
     * Locks the registry against further registration.
     */
    final public function lock() {
        do_action( 'widget_registry_locked', $this );
        $this->locked = true;
    }

    protected static function reset( $hard = false ) {
        return $hard;
    }
}
"#;

    #[test]
    fn test_file_docblock() {
        let parsed = parse(PLUGIN_SOURCE);
        let doc = parsed.doc.expect("file docblock");
        assert_eq!(doc.summary, "Plugin bootstrap file.");
        assert_eq!(doc.description, "Wires the widget registry together.");
    }

    #[test]
    fn test_includes_in_source_order() {
        let parsed = parse(PLUGIN_SOURCE);
        assert_eq!(parsed.includes.len(), 2);
        assert_eq!(parsed.includes[0].kind, IncludeKind::RequireOnce);
        assert_eq!(
            parsed.includes[0].name,
            "__DIR__ . '/includes/registry.php'"
        );
        assert_eq!(parsed.includes[1].kind, IncludeKind::Include);
        assert_eq!(parsed.includes[1].name, "'helpers.php'");
    }

    #[test]
    fn test_constants_from_define_and_const() {
        let parsed = parse(PLUGIN_SOURCE);
        assert_eq!(parsed.constants.len(), 2);
        assert_eq!(parsed.constants[0].name, "WIDGET_VERSION");
        assert_eq!(parsed.constants[0].value.as_deref(), Some("'2.1.0'"));
        assert_eq!(parsed.constants[1].name, "WIDGET_SLUG");
        assert_eq!(parsed.constants[1].value.as_deref(), Some("'widget'"));
    }

    #[test]
    fn test_function_extraction() {
        let parsed = parse(PLUGIN_SOURCE);
        assert_eq!(parsed.functions.len(), 1);
        let function = &parsed.functions[0];
        assert_eq!(function.name, "register_widget_type");
        assert_eq!(function.fq_name, "register_widget_type");
        assert_eq!(function.arguments.len(), 2);
        assert_eq!(function.arguments[0].name, "$name");
        assert_eq!(function.arguments[0].type_name, "");
        assert!(function.arguments[0].default.is_none());
        assert_eq!(function.arguments[1].name, "$args");
        assert_eq!(function.arguments[1].type_name, "array");
        assert_eq!(function.arguments[1].default.as_deref(), Some("array()"));
        let doc = function.doc.as_ref().expect("function docblock");
        assert_eq!(doc.summary, "Registers a widget type.");
        assert_eq!(doc.tags.len(), 3);
    }

    #[test]
    fn test_hooks_collected_in_source_order() {
        let parsed = parse(PLUGIN_SOURCE);
        assert_eq!(parsed.hooks.len(), 3);

        let filter = &parsed.hooks[0];
        assert_eq!(filter.kind, HookKind::Filter);
        assert_eq!(filter.name, "widget_type_args");
        assert_eq!(filter.arguments, vec!["$args", "$name"]);
        assert_eq!(
            filter.doc.description,
            "Filters the arguments of a widget type."
        );

        let action = &parsed.hooks[1];
        assert_eq!(action.kind, HookKind::Action);
        assert_eq!(action.name, "registered_widget_type_{$name}");
        assert_eq!(action.arguments, vec!["$args"]);

        let method_hook = &parsed.hooks[2];
        assert_eq!(method_hook.kind, HookKind::Action);
        assert_eq!(method_hook.name, "widget_registry_locked");
        assert_eq!(method_hook.arguments, vec!["$this"]);
        assert!(method_hook.doc.description.is_empty());
    }

    #[test]
    fn test_class_extraction() {
        let parsed = parse(PLUGIN_SOURCE);
        assert_eq!(parsed.classes.len(), 1);
        let class = &parsed.classes[0];
        assert_eq!(class.name, "Widget_Registry");
        assert_eq!(class.extends.as_deref(), Some("Base_Registry"));
        assert_eq!(class.implements, vec!["Countable", "ArrayAccess"]);
        assert!(!class.is_final);
        assert!(!class.is_abstract);
        assert_eq!(
            class.doc.as_ref().map(|d| d.summary.as_str()),
            Some("Central widget lookup.")
        );
    }

    #[test]
    fn test_property_extraction() {
        let parsed = parse(PLUGIN_SOURCE);
        let class = &parsed.classes[0];
        assert_eq!(class.properties.len(), 2);

        let widgets = &class.properties[0];
        assert_eq!(widgets.name, "$widgets");
        assert!(widgets.is_static);
        assert_eq!(widgets.visibility, Visibility::Public);
        assert_eq!(widgets.default.as_deref(), Some("array()"));
        assert!(widgets.doc.is_some());

        let locked = &class.properties[1];
        assert_eq!(locked.name, "$locked");
        assert!(!locked.is_static);
        assert_eq!(locked.visibility, Visibility::Private);
        assert_eq!(locked.default.as_deref(), Some("false"));
        assert!(locked.doc.is_none());
    }

    #[test]
    fn test_method_extraction() {
        let parsed = parse(PLUGIN_SOURCE);
        let class = &parsed.classes[0];
        assert_eq!(class.methods.len(), 2);

        let lock = &class.methods[0];
        assert_eq!(lock.name, "lock");
        assert!(lock.is_final);
        assert!(!lock.is_static);
        assert_eq!(lock.visibility, Visibility::Public);
        assert_eq!(lock.namespace, "");
        assert!(lock.doc.is_some());

        let reset = &class.methods[1];
        assert_eq!(reset.name, "reset");
        assert!(reset.is_static);
        assert_eq!(reset.visibility, Visibility::Protected);
        assert_eq!(reset.arguments.len(), 1);
        assert_eq!(reset.arguments[0].default.as_deref(), Some("false"));
    }

    #[test]
    fn test_line_ranges_are_one_indexed() {
        let parsed = parse("<?php\nfunction f() {\n}\n");
        let function = &parsed.functions[0];
        assert_eq!(function.line, 2);
        assert_eq!(function.end_line, 3);
    }

    #[test]
    fn test_namespaced_declarations() {
        let parsed = parse(
            "<?php\n\
             namespace Vendor\\Plugin;\n\
             \n\
             function boot() {}\n\
             \n\
             class Loader {\n\
                 public function run() {}\n\
             }\n",
        );
        assert_eq!(parsed.functions[0].fq_name, "Vendor\\Plugin\\boot");
        assert_eq!(parsed.classes[0].fq_name, "Vendor\\Plugin\\Loader");
        assert_eq!(parsed.classes[0].methods[0].namespace, "Vendor\\Plugin");
    }

    #[test]
    fn test_braced_namespace_is_scoped() {
        let parsed = parse(
            "<?php\n\
             namespace Vendor {\n\
                 function inside() {}\n\
             }\n\
             namespace {\n\
                 function outside() {}\n\
             }\n",
        );
        assert_eq!(parsed.functions[0].fq_name, "Vendor\\inside");
        assert_eq!(parsed.functions[1].fq_name, "outside");
    }

    #[test]
    fn test_hook_inside_conditional_is_found() {
        let parsed = parse(
            "<?php\n\
             if ( $ready ) {\n\
                 do_action( 'plugin_ready' );\n\
             }\n",
        );
        assert_eq!(parsed.hooks.len(), 1);
        assert_eq!(parsed.hooks[0].name, "plugin_ready");
        assert_eq!(parsed.hooks[0].line, 3);
    }

    #[test]
    fn test_return_wrapped_call_is_not_a_hook() {
        let parsed = parse(
            "<?php\n\
             function the_title( $title ) {\n\
                 return apply_filters( 'the_title', $title );\n\
             }\n",
        );
        assert!(parsed.hooks.is_empty());
    }

    #[test]
    fn test_malformed_hook_call_is_hard_error() {
        let mut parser = SourceParser::new().unwrap();
        let err = parser
            .parse_source("<?php\ndo_action();\n", Path::new("bad.php"))
            .unwrap_err();
        assert!(matches!(err, HookdocError::Parse(_)));
    }

    #[test]
    fn test_file_docblock_claimed_by_function_is_absent() {
        let parsed = parse(
            "<?php\n\
             /**\n\
              * Does the thing.\n\
              */\n\
             function do_the_thing() {}\n",
        );
        assert!(parsed.doc.is_none());
        assert_eq!(
            parsed.functions[0].doc.as_ref().map(|d| d.summary.as_str()),
            Some("Does the thing.")
        );
    }

    #[test]
    fn test_interfaces_and_class_constants_are_skipped() {
        let parsed = parse(
            "<?php\n\
             interface Renderable {\n\
                 public function render();\n\
             }\n\
             class Widget {\n\
                 const KIND = 'widget';\n\
             }\n",
        );
        assert_eq!(parsed.classes.len(), 1);
        assert_eq!(parsed.classes[0].name, "Widget");
        assert!(parsed.constants.is_empty());
    }
}
