//! Generated-source normalization
//!
//! Final formatting pass over assembled interface text: validates that the
//! text is parseable Go, removes imports nothing references, simplifies
//! redundant result parentheses and reindents to canonical tab style. The
//! assembly step upstream is deliberately naive, so everything it leaves
//! rough is cleaned up here.

use std::collections::HashSet;
use regex::Regex;
use thiserror::Error;
use tree_sitter::{Node, Parser};


/// Formatting options, mirroring the knobs of a gofmt-style formatter.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Indent with tabs instead of spaces.
    pub tab_indent: bool,

    /// Spaces per indent level when not indenting with tabs.
    pub tab_width: usize,

    /// Accept input without a package clause.
    pub fragment: bool,

    /// Keep comment lines in the output.
    pub comments: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            tab_indent: true,
            tab_width: 2,
            fragment: true,
            comments: true,
        }
    }
}

/// The generated text is not valid Go.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct NormalizeError {
    pub message: String,
}

impl NormalizeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Normalize generated Go source.
pub fn format_source(src: &str, options: &NormalizeOptions) -> Result<String, NormalizeError> {
    let mut parser = Parser::new();
    parser.set_language(tree_sitter_go::language()).unwrap();
    let tree = parser
        .parse(src, None)
        .ok_or_else(|| NormalizeError::new("parser produced no tree"))?;
    let root = tree.root_node();

    if root.has_error() {
        let node = first_error_node(root).unwrap_or(root);
        return Err(NormalizeError::new(format!(
            "syntax error at {}:{}",
            node.start_position().row + 1,
            node.start_position().column + 1
        )));
    }

    let package_row = package_clause_row(root);
    if package_row.is_none() && !options.fragment {
        return Err(NormalizeError::new("missing package clause"));
    }

    let used = used_qualifiers(root, src);
    let imports = collect_imports(root, src);
    let kept: Vec<&ImportLine> = imports
        .iter()
        .filter(|import| import.always_kept() || used.contains(&import.binding))
        .collect();

    // Rebuild the file line by line: original import declarations dropped, a
    // deduplicated block of surviving imports reinserted after the package
    // clause.
    let lines: Vec<&str> = src.lines().collect();
    let mut import_rows = vec![false; lines.len()];
    for decl in import_declarations(root) {
        for row in decl.start_position().row..=decl.end_position().row {
            if row < import_rows.len() {
                import_rows[row] = true;
            }
        }
    }

    let mut rebuilt: Vec<String> = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        if import_rows[row] {
            continue;
        }
        rebuilt.push((*line).to_string());
        if Some(row) == package_row && !kept.is_empty() {
            rebuilt.push(String::new());
            rebuilt.push("import (".to_string());
            for import in &kept {
                rebuilt.push(import.text.clone());
            }
            rebuilt.push(")".to_string());
        }
    }

    Ok(reflow(&rebuilt, options))
}

struct ImportLine {
    /// Verbatim spec text, alias included.
    text: String,

    /// Name the import binds in the file's scope.
    binding: String,
}

impl ImportLine {
    /// Blank and dot imports are kept unconditionally; they are imported for
    /// effect, not reference.
    fn always_kept(&self) -> bool {
        self.binding == "_" || self.binding == "."
    }
}

fn collect_imports(root: Node, src: &str) -> Vec<ImportLine> {
    let mut imports = Vec::new();

    for decl in import_declarations(root) {
        let mut cursor = decl.walk();
        for child in decl.children(&mut cursor) {
            match child.kind() {
                "import_spec" => imports.push(import_line(child, src)),
                "import_spec_list" => {
                    for spec in child.children(&mut child.walk()) {
                        if spec.kind() == "import_spec" {
                            imports.push(import_line(spec, src));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    imports
}

fn import_line(spec: Node, src: &str) -> ImportLine {
    let text = node_text(spec, src).trim().to_string();
    let binding = match spec.child_by_field_name("name") {
        Some(name) => node_text(name, src),
        None => spec
            .child_by_field_name("path")
            .map(|path| binding_from_path(&node_text(path, src)))
            .unwrap_or_default(),
    };
    ImportLine { text, binding }
}

/// Guess the package an import path binds: its last segment, skipping a
/// trailing major-version segment like `v2`. Textual heuristic only; the
/// real binding would require resolving the imported package.
fn binding_from_path(path_literal: &str) -> String {
    let path = path_literal.trim_matches(|c| c == '"' || c == '`');
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    if is_version_segment(last) {
        if let Some(previous) = segments.next() {
            return previous.to_string();
        }
    }
    last.to_string()
}

fn is_version_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next() == Some('v') && chars.clone().next().is_some() && chars.all(|c| c.is_ascii_digit())
}

/// Package names used as qualifiers anywhere outside the import block.
fn used_qualifiers(root: Node, src: &str) -> HashSet<String> {
    let mut used = HashSet::new();
    collect_qualifiers(root, src, &mut used);
    used
}

fn collect_qualifiers(node: Node, src: &str, used: &mut HashSet<String>) {
    match node.kind() {
        "qualified_type" => {
            if let Some(package) = node.child_by_field_name("package") {
                used.insert(node_text(package, src));
            }
        }
        "selector_expression" => {
            if let Some(operand) = node.child_by_field_name("operand") {
                if operand.kind() == "identifier" {
                    used.insert(node_text(operand, src));
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_qualifiers(child, src, used);
    }
}

fn import_declarations(root: Node) -> Vec<Node> {
    let mut decls = Vec::new();
    let mut cursor = root.walk();
    for node in root.children(&mut cursor) {
        if node.kind() == "import_declaration" {
            decls.push(node);
        }
    }
    decls
}

fn package_clause_row(root: Node) -> Option<usize> {
    let mut cursor = root.walk();
    let row = root
        .children(&mut cursor)
        .find(|n| n.kind() == "package_clause")
        .map(|n| n.end_position().row);
    row
}

/// Line-level reformat: result-paren simplification, indentation from brace
/// and paren nesting, blank-line collapsing.
fn reflow(lines: &[String], options: &NormalizeOptions) -> String {
    let empty_results = Regex::new(r"\) \(\)\s*$").expect("result pattern");
    let single_result = Regex::new(r"\) \(([^,()\s]+)\)\s*$").expect("result pattern");

    let unit = if options.tab_indent {
        "\t".to_string()
    } else {
        " ".repeat(options.tab_width)
    };

    let mut out = String::new();
    let mut depth: usize = 0;
    let mut previous_blank = true;

    for raw in lines {
        let line = raw.trim();

        if line.is_empty() {
            if !previous_blank {
                out.push('\n');
                previous_blank = true;
            }
            continue;
        }
        if line.starts_with("//") {
            if options.comments {
                out.push_str(&unit.repeat(depth));
                out.push_str(line);
                out.push('\n');
                previous_blank = false;
            }
            continue;
        }

        let line = empty_results.replace(line, ")").into_owned();
        let line = single_result.replace(&line, ") $1").into_owned();

        let opens = line.chars().filter(|c| matches!(c, '{' | '(')).count();
        let closes = line.chars().filter(|c| matches!(c, '}' | ')')).count();
        if closes > opens && (line.starts_with('}') || line.starts_with(')')) {
            depth = depth.saturating_sub(closes - opens);
        }

        out.push_str(&unit.repeat(depth));
        out.push_str(&line);
        out.push('\n');
        previous_blank = false;

        if opens > closes {
            depth += opens - closes;
        }
    }

    let trimmed = out.trim_end();
    format!("{trimmed}\n")
}

fn node_text(node: Node, src: &str) -> String {
    src[node.start_byte()..node.end_byte()].to_string()
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
