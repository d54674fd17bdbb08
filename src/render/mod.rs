//! Field-list rendering
//!
//! Turns parameter and result lists back into textual fragments, stripping
//! the target package's own name where it appears as a type qualifier. The
//! generated interface lives in that package, so the qualifier would be
//! redundant there.

use regex::Regex;
use tree_sitter::Node;


/// Render a parameter or result list as one fragment per declaration group.
///
/// Names sharing a type render comma-joined (`"a, b int"`), unnamed entries
/// render as the bare type text. An absent list renders as no fragments.
pub fn format_field_list(list: Option<Node>, src: &str, target_pkg: &str) -> Vec<String> {
    let Some(list) = list else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    let mut cursor = list.walk();
    for decl in list.children(&mut cursor) {
        let variadic = match decl.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };

        let mut names = Vec::new();
        let mut type_node = None;
        for child in decl.children(&mut decl.walk()) {
            if !child.is_named() || child.kind() == "comment" {
                continue;
            }
            if child.kind() == "identifier" {
                names.push(node_text(child, src));
            } else {
                type_node = Some(child);
            }
        }

        let Some(type_node) = type_node else {
            continue;
        };
        let mut type_text = strip_qualifier(&node_text(type_node, src), target_pkg);
        if variadic {
            type_text = format!("...{type_text}");
        }

        if names.is_empty() {
            parts.push(type_text);
        } else {
            parts.push(format!("{} {}", names.join(", "), type_text));
        }
    }

    parts
}

/// Remove `pkg.` qualifiers referring to the target package itself.
///
/// Purely textual: the qualifier is matched as a whole token preceded by
/// start-of-string, `*`, `(`, `[`, `]` or whitespace, so an unrelated
/// identifier that merely ends with the package name is left alone. A
/// heuristic, not semantic resolution; it cannot tell a same-named local
/// variable from the package.
pub fn strip_qualifier(type_text: &str, target_pkg: &str) -> String {
    if target_pkg.is_empty() {
        return type_text.to_string();
    }

    let pattern = format!(r"(?P<b>^|[*(\[\]\s]){}\.", regex::escape(target_pkg));
    let re = Regex::new(&pattern).expect("qualifier pattern");
    re.replace_all(type_text, "$b").into_owned()
}

fn node_text(node: Node, src: &str) -> String {
    src[node.start_byte()..node.end_byte()].to_string()
}
