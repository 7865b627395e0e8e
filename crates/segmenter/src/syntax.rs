use crate::error::{Result, SegmenterError};
use crate::language::Language;
use crate::types::{Declaration, DeclarationKind, LineSpan, NodeKind, TopLevelNode};
use tree_sitter::{Node, Parser};

/// Turns source text into the ordered list of its top-level nodes.
pub trait SyntaxProducer {
    /// Parse `source` and return its module-level statements in document
    /// order, or a syntax error.
    fn top_level_nodes(&mut self, source: &str) -> Result<Vec<TopLevelNode>>;
}

/// Tree-sitter backed producer for the JavaScript family
pub struct TreeSitterProducer {
    parser: Parser,
    language: Language,
    strict: bool,
}

impl TreeSitterProducer {
    /// Create new producer for a language
    pub fn new(language: Language, strict: bool) -> Result<Self> {
        if !language.is_supported() {
            return Err(SegmenterError::unsupported_language(language.as_str()));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| SegmenterError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self {
            parser,
            language,
            strict,
        })
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl SyntaxProducer for TreeSitterProducer {
    fn top_level_nodes(&mut self, source: &str) -> Result<Vec<TopLevelNode>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SegmenterError::tree_sitter("parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            if self.strict {
                return Err(SegmenterError::SyntaxError {
                    line: at.row + 1,
                    column: at.column + 1,
                });
            }
            log::warn!(
                "{} source has syntax errors (first at line {}), segmenting recovered tree",
                self.language,
                at.row + 1
            );
        }

        let bytes = source.as_bytes();
        let mut cursor = root.walk();
        let nodes = root
            .children(&mut cursor)
            .filter(|child| !child.is_extra() && child.kind() != "hash_bang_line")
            .map(|child| to_top_level(child, bytes))
            .collect();

        Ok(nodes)
    }
}

fn to_top_level(node: Node, source: &[u8]) -> TopLevelNode {
    let kind = match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            NodeKind::Function
        }
        "class_declaration" | "abstract_class_declaration" => NodeKind::Class,
        "import_statement" | "import_alias" => NodeKind::Import,
        "export_statement" => NodeKind::Export(exported_declaration(node, source)),
        _ => NodeKind::Statement,
    };

    TopLevelNode {
        kind,
        name: identifier(node, source),
        span: line_span(node),
    }
}

/// Declaration carried by an export statement, if it maps to a known kind.
/// `export default <expr>` only counts when the expression is itself a
/// function or class.
fn exported_declaration(export: Node, source: &[u8]) -> Option<Declaration> {
    let inner = export
        .child_by_field_name("declaration")
        .or_else(|| export.child_by_field_name("value"))?;
    let mut declaration = declaration(inner, source)?;

    // Decorators written before `export` belong to the declaration
    if has_leading_decorator(export, inner) {
        declaration.span = declaration
            .span
            .and_then(|span| LineSpan::new(export.start_position().row + 1, span.end));
    }
    Some(declaration)
}

fn has_leading_decorator(export: Node, inner: Node) -> bool {
    let mut cursor = export.walk();
    let found = export
        .children(&mut cursor)
        .take_while(|child| child.id() != inner.id())
        .any(|child| child.kind() == "decorator");
    found
}

fn declaration(node: Node, source: &[u8]) -> Option<Declaration> {
    if node.kind() == "ambient_declaration" {
        // `declare function f(): void;` takes the kind and name of what it declares
        let declared = node.named_child(0)?;
        let kind = declaration_kind(declared.kind())?;
        return Some(Declaration {
            kind,
            name: identifier(declared, source),
            span: line_span(node),
        });
    }

    Some(Declaration {
        kind: declaration_kind(node.kind())?,
        name: identifier(node, source),
        span: line_span(node),
    })
}

fn declaration_kind(grammar_kind: &str) -> Option<DeclarationKind> {
    let kind = match grammar_kind {
        "function_declaration"
        | "generator_function_declaration"
        | "function_signature"
        | "function_expression"
        | "function"
        | "generator_function"
        | "arrow_function" => DeclarationKind::Function,
        "class_declaration" | "abstract_class_declaration" | "class" => DeclarationKind::Class,
        "lexical_declaration" | "variable_declaration" => DeclarationKind::Variable,
        "interface_declaration" => DeclarationKind::Interface,
        "type_alias_declaration" => DeclarationKind::TypeAlias,
        "enum_declaration" => DeclarationKind::Enum,
        "module" | "internal_module" => DeclarationKind::Namespace,
        _ => return None,
    };
    Some(kind)
}

/// Name declared by the node itself (its `name` field), never a nested one
fn identifier(node: Node, source: &[u8]) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    name.utf8_text(source)
        .ok()
        .map(str::to_string)
        .filter(|text| !text.is_empty())
}

/// Zero-width nodes (inserted by error recovery) have no usable span
fn line_span(node: Node) -> Option<LineSpan> {
    if node.start_byte() == node.end_byte() {
        return None;
    }
    LineSpan::new(node.start_position().row + 1, node.end_position().row + 1)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
