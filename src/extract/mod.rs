//! Go source extraction
//!
//! Walks a tree-sitter parse of a single Go file and records every exported
//! method together with its receiver type, doc comments and the file's
//! imports. Free functions and non-exported methods are skipped.

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::render;


/// A malformed source file, reported with the position of the first
/// offending node in the parse tree.
#[derive(Debug, Error)]
#[error("syntax error at {line}:{column} near `{snippet}`")]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

/// One exported method discovered on a receiver type.
#[derive(Debug, Clone)]
pub struct Method {
    /// Single-line signature, `Name(params) (results)`.
    pub signature: String,

    /// Literal `// ...` comment lines immediately above the declaration.
    pub docs: Vec<String>,
}

impl Method {
    /// Doc lines followed by the signature, in emission order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.docs.clone();
        lines.push(self.signature.clone());
        lines
    }
}

/// Everything extracted from one source file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    /// Declared package name.
    pub package: String,

    /// Receiver type name to its methods, in source order. Pointer and value
    /// receivers collapse onto the same key.
    pub methods: Vec<(String, Vec<Method>)>,

    /// Verbatim import specs (alias + quoted path), in source order.
    pub imports: Vec<String>,

    /// Type name to declaration doc text, populated when doc copying is on.
    pub type_docs: HashMap<String, String>,
}

impl FileExtraction {
    fn push_method(&mut self, type_name: &str, method: Method) {
        if let Some((_, methods)) = self.methods.iter_mut().find(|(n, _)| n == type_name) {
            methods.push(method);
        } else {
            self.methods.push((type_name.to_string(), vec![method]));
        }
    }
}

/// Go method extractor backed by tree-sitter.
pub struct GoExtractor {
    parser: Parser,
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl GoExtractor {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser.set_language(tree_sitter_go::language()).unwrap();
        Self { parser }
    }

    /// Extract the exported method set of a single Go source file.
    ///
    /// `target_pkg` is the package the generated interface will live in;
    /// its name is stripped from type references as a redundant qualifier.
    pub fn parse_source(
        &mut self,
        src: &str,
        copy_type_docs: bool,
        target_pkg: &str,
    ) -> Result<FileExtraction, SyntaxError> {
        let tree = self.parser.parse(src, None).ok_or_else(|| SyntaxError {
            line: 1,
            column: 1,
            snippet: "parser produced no tree".to_string(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(syntax_error(root, src));
        }

        let mut extraction = FileExtraction {
            package: package_name(root, src).ok_or_else(|| SyntaxError {
                line: 1,
                column: 1,
                snippet: "missing package clause".to_string(),
            })?,
            ..Default::default()
        };

        let mut seen_signatures = HashSet::new();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            match node.kind() {
                "import_declaration" => self.collect_imports(node, src, &mut extraction),
                "method_declaration" => {
                    self.collect_method(node, src, target_pkg, &mut seen_signatures, &mut extraction)
                }
                // Free functions never contribute to an interface.
                _ => {}
            }
        }

        if copy_type_docs {
            extraction.type_docs = collect_type_docs(root, src);
        }

        Ok(extraction)
    }

    fn collect_imports(&self, decl: Node, src: &str, extraction: &mut FileExtraction) {
        let mut cursor = decl.walk();
        for child in decl.children(&mut cursor) {
            match child.kind() {
                "import_spec" => extraction.imports.push(node_text(child, src)),
                "import_spec_list" => {
                    for spec in child.children(&mut child.walk()) {
                        if spec.kind() == "import_spec" {
                            extraction.imports.push(node_text(spec, src));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_method(
        &self,
        decl: Node,
        src: &str,
        target_pkg: &str,
        seen_signatures: &mut HashSet<String>,
        extraction: &mut FileExtraction,
    ) {
        let Some(name_node) = decl.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, src);
        if !is_exported(&name) {
            return;
        }

        let Some(type_name) = receiver_type_name(decl, src) else {
            return;
        };

        let params = render::format_field_list(decl.child_by_field_name("parameters"), src, target_pkg);
        let results = result_fragments(decl.child_by_field_name("result"), src, target_pkg);

        // Naive single-line join; the normalizer simplifies the result parens.
        let signature = format!("{}({}) ({})", name, params.join(", "), results.join(", "));
        if !seen_signatures.insert(signature.clone()) {
            return;
        }

        extraction.push_method(
            &type_name,
            Method {
                signature,
                docs: doc_comments_before(decl, src),
            },
        );
    }
}

/// Receiver type name with one leading `*` stripped, so pointer and value
/// receivers of the same type share an interface block.
fn receiver_type_name(decl: Node, src: &str) -> Option<String> {
    let receiver = decl.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    let param = receiver
        .children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;

    let mut type_node = None;
    for child in param.children(&mut param.walk()) {
        if child.is_named() && child.kind() != "identifier" && child.kind() != "comment" {
            type_node = Some(child);
        }
    }

    let text = node_text(type_node?, src);
    Some(text.strip_prefix('*').unwrap_or(&text).to_string())
}

/// Result list fragments. Go allows either a parenthesized field list or a
/// single bare type in result position.
fn result_fragments(result: Option<Node>, src: &str, target_pkg: &str) -> Vec<String> {
    match result {
        None => Vec::new(),
        Some(node) if node.kind() == "parameter_list" => {
            render::format_field_list(Some(node), src, target_pkg)
        }
        Some(node) => vec![render::strip_qualifier(&node_text(node, src), target_pkg)],
    }
}

fn package_name(root: Node, src: &str) -> Option<String> {
    let mut cursor = root.walk();
    for node in root.children(&mut cursor) {
        if node.kind() == "package_clause" {
            for child in node.children(&mut node.walk()) {
                if child.kind() == "package_identifier" {
                    return Some(node_text(child, src));
                }
            }
        }
    }
    None
}

/// Contiguous `comment` siblings directly above a declaration, as literal
/// source lines in original order.
fn doc_comments_before(node: Node, src: &str) -> Vec<String> {
    let mut docs = Vec::new();
    let mut row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 != row {
            break;
        }
        docs.push(node_text(sibling, src));
        row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    docs.reverse();
    docs
}

/// Declaration doc text per type name, comment markers stripped. Grouped
/// `type (...)` declarations share the declaration's doc block.
fn collect_type_docs(root: Node, src: &str) -> HashMap<String, String> {
    let mut type_docs = HashMap::new();
    let mut cursor = root.walk();

    for node in root.children(&mut cursor) {
        if node.kind() != "type_declaration" {
            continue;
        }

        let doc = doc_comments_before(node, src)
            .iter()
            .map(|line| strip_comment_marker(line))
            .collect::<Vec<_>>()
            .join("\n");
        let doc = doc.trim_end_matches('\n').to_string();

        for spec in node.children(&mut node.walk()) {
            let name_node = match spec.kind() {
                "type_spec" | "type_alias" => spec.child_by_field_name("name"),
                _ => None,
            };
            if let Some(name_node) = name_node {
                type_docs.insert(node_text(name_node, src), doc.clone());
            }
        }
    }

    type_docs
}

fn strip_comment_marker(line: &str) -> String {
    let body = line.trim_start();
    let body = body.strip_prefix("//").unwrap_or(body);
    body.strip_prefix(' ').unwrap_or(body).to_string()
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

fn node_text(node: Node, src: &str) -> String {
    src[node.start_byte()..node.end_byte()].to_string()
}

fn syntax_error(root: Node, src: &str) -> SyntaxError {
    let node = first_error_node(root).unwrap_or(root);
    let mut snippet = node_text(node, src);
    if snippet.chars().count() > 40 {
        // Truncate on a char boundary; the node text may hold multibyte
        // characters.
        snippet = snippet.chars().take(40).collect();
    }
    if node.is_missing() {
        snippet = format!("missing {}", node.kind());
    }
    SyntaxError {
        line: node.start_position().row + 1,
        column: node.start_position().column + 1,
        snippet,
    }
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    Some(node)
}
