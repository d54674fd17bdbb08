//! Interface text assembly
//!
//! Concatenates the merged per-type method sets into a single Go source
//! blob: top comment, package clause, import block, one interface per
//! receiver type. The blob is intentionally unpolished; the normalizer owns
//! canonical formatting and unused-import removal.

/// One generated interface block, in aggregation order.
#[derive(Debug, Clone)]
pub struct TypeBlock {
    /// Receiver type name the interface was derived from.
    pub name: String,

    /// Doc text placed above the interface, empty when there is none.
    pub doc: String,

    /// Method doc and signature lines, in discovery order.
    pub lines: Vec<String>,
}

/// Assemble the generated file as raw text.
///
/// Interface names are `<TypeName><suffix>`. Every collected import is
/// emitted whether used or not; the normalizer drops the dead ones.
pub fn render_interface(
    comment: &str,
    package: &str,
    suffix: &str,
    types: &[TypeBlock],
    imports: &[String],
) -> String {
    let mut output = vec![
        format!("// {comment}"),
        String::new(),
        format!("package {package}"),
        "import (".to_string(),
    ];
    output.extend(imports.iter().cloned());
    output.push(")".to_string());
    output.push(String::new());

    for block in types {
        if !block.doc.trim().is_empty() {
            for line in block.doc.lines() {
                output.push(format!("// {line}"));
            }
        }
        output.push(format!("type {}{} interface {{", block.name, suffix));
        output.extend(block.lines.iter().cloned());
        output.push("}".to_string());
        output.push(String::new());
    }

    let mut text = output.join("\n");
    text.push('\n');
    text
}
