//! Go source parser built on tree-sitter
//!
//! Only the parts of a file the metrics need are extracted: the package
//! clause, import paths and the shape of every top-level declaration.

use crate::error::{MetricsError, Result};
use crate::models::declarations::{Declaration, DeclarationKind, SourceFile};
use crate::parsers::SourceParser;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

/// Tree-sitter backed [`SourceParser`] for Go files
///
/// A fresh `tree_sitter::Parser` is built per file, so one instance can be
/// shared by every worker.
pub struct GoSourceParser {
    language: Language,
}

impl GoSourceParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::language(),
        }
    }

    /// Parse Go source text; `path` is only used for error reporting
    pub fn parse_source(&self, source: &str, path: &Path) -> Result<SourceFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| MetricsError::ParserSetup {
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| MetricsError::parse_error(path, "parser produced no syntax tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let message = match first_error(root) {
                Some(node) => {
                    let pos = node.start_position();
                    format!("syntax error at line {} column {}", pos.row + 1, pos.column + 1)
                }
                None => "syntax error".to_string(),
            };
            return Err(MetricsError::parse_error(path, message));
        }

        let bytes = source.as_bytes();
        let mut file = SourceFile::default();
        let mut cursor = root.walk();

        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    let mut inner = node.walk();
                    let ident = node
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "package_identifier");
                    if let Some(ident) = ident {
                        file.package_name = text(ident, bytes).to_string();
                    }
                }
                "import_declaration" => collect_imports(node, bytes, &mut file.imports),
                "type_declaration" => collect_type_specs(node, bytes, &mut file.declarations),
                "function_declaration" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        file.declarations
                            .push(Declaration::new(text(name, bytes), DeclarationKind::Function));
                    }
                }
                "method_declaration" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        file.declarations
                            .push(Declaration::new(text(name, bytes), DeclarationKind::Method));
                    }
                }
                _ => {}
            }
        }

        Ok(file)
    }
}

impl Default for GoSourceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for GoSourceParser {
    fn parse_file(&self, path: &Path) -> Result<SourceFile> {
        let source = fs::read_to_string(path)
            .map_err(|e| MetricsError::parse_error(path, format!("cannot read file: {}", e)))?;
        self.parse_source(&source, path)
    }
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Depth-first search for the first error or missing node
fn first_error<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn collect_imports(decl: Node<'_>, source: &[u8], imports: &mut Vec<String>) {
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => push_import(child, source, imports),
            "import_spec_list" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    if spec.kind() == "import_spec" {
                        push_import(spec, source, imports);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_import(spec: Node<'_>, source: &[u8], imports: &mut Vec<String>) {
    if let Some(path) = spec.child_by_field_name("path") {
        let raw = text(path, source);
        let unquoted = raw.trim_matches(|c| c == '"' || c == '`');
        if !unquoted.is_empty() {
            imports.push(unquoted.to_string());
        }
    }
}

fn collect_type_specs(decl: Node<'_>, source: &[u8], declarations: &mut Vec<Declaration>) {
    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        let kind = match spec.kind() {
            "type_spec" => match spec.child_by_field_name("type").map(|t| t.kind()) {
                Some("interface_type") => DeclarationKind::Interface,
                Some("struct_type") => DeclarationKind::Struct,
                _ => DeclarationKind::OtherType,
            },
            "type_alias" => DeclarationKind::TypeAlias,
            _ => continue,
        };

        if let Some(name) = spec.child_by_field_name("name") {
            declarations.push(Declaration::new(text(name, source), kind));
        }
    }
}
