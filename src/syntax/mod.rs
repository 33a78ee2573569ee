//! Syntax tree provider.
//!
//! Thin wrapper around tree-sitter: selects the JavaScript or TypeScript
//! grammar, parses source text into a [`Tree`], and offers the small set of
//! node helpers the extractors need (call decomposition, string-literal
//! arguments, spans). tree-sitter recovers from malformed input by emitting
//! ERROR nodes; a tree containing any is rejected here so a broken file
//! contributes zero records instead of garbage.

use tree_sitter::{Language, Node, Parser, Tree};

use crate::errors::{Result, ScanError};

/// Language dialect accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    JavaScript,
    TypeScript,
}

impl Dialect {
    fn language(self) -> Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}

/// Parses `source` into a syntax tree, failing with a [`ScanError::Parse`]
/// naming `file` (and the first broken line, where available) on malformed
/// input.
pub fn parse(source: &str, dialect: Dialect, file: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| ScanError::parse(file, e.to_string(), None))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScanError::parse(file, "parser produced no tree", None))?;

    if tree.root_node().has_error() {
        let line = first_error_line(tree.root_node());
        return Err(ScanError::parse(file, "syntax error", line));
    }
    Ok(tree)
}

/// 1-based line of the first ERROR or MISSING node, by pre-order search.
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(child) {
                return Some(line);
            }
        }
    }
    None
}

/// Verbatim text of a node.
pub fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.start_byte()..node.end_byte()]
}

/// Text of an identifier node, or None for any other kind.
pub fn identifier_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    (node.kind() == "identifier").then(|| node_text(node, source))
}

/// Splits a member expression (`obj.prop`) into its object node and the
/// property name.
pub fn member_parts<'t, 's>(node: Node<'t>, source: &'s str) -> Option<(Node<'t>, &'s str)> {
    if node.kind() != "member_expression" {
        return None;
    }
    let object = node.child_by_field_name("object")?;
    let property = node.child_by_field_name("property")?;
    Some((object, node_text(property, source)))
}

/// First string or template literal among a call's arguments. Declarations
/// without a literal title are not test declarations for our purposes.
pub fn first_string_arg<'t>(call: Node<'t>) -> Option<Node<'t>> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let found = args
        .named_children(&mut cursor)
        .find(|n| n.kind() == "string" || n.kind() == "template_string");
    found
}

/// Inner text of a string/template literal, without the delimiters.
pub fn literal_text<'s>(node: Node, source: &'s str) -> &'s str {
    let text = node_text(node, source);
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
