//! Multi-file aggregation
//!
//! Runs the extractor over an ordered list of files and merges the results
//! into one generated blob. The first read, parse or normalization failure
//! aborts the whole run; there is no partial output.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::emit::{self, TypeBlock};
use crate::error::{Error, Result};
use crate::extract::GoExtractor;
use crate::normalize::{self, NormalizeOptions};

#[cfg(test)]
mod tests;

/// Inputs controlling one merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Top-of-file comment line.
    pub comment: String,

    /// Package override. Accepted for interface compatibility but ignored:
    /// the output package is always recomputed from the first file that
    /// contributes methods.
    pub package: Option<String>,

    /// Suffix appended to each receiver type name to form the interface name.
    pub suffix: String,

    /// Comment prefixed onto every generated interface's doc block.
    pub iface_comment: String,

    /// Copy the receiver type's own declaration docs into the interface doc.
    pub copy_type_docs: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            comment: "Code generated by ifacegen. DO NOT EDIT.".to_string(),
            package: None,
            suffix: "Interface".to_string(),
            iface_comment: String::new(),
            copy_type_docs: false,
        }
    }
}

/// Merge the exported method sets of `files` into normalized interface
/// source.
///
/// Files contributing no methods are skipped entirely. An empty overall
/// result is not an error; the returned blob is simply empty.
pub async fn merge_files(files: &[PathBuf], options: &MergeOptions) -> Result<Vec<u8>> {
    info!("generating interfaces from {} file(s)", files.len());
    if let Some(package) = &options.package {
        debug!("ignoring package override {package:?}; recomputed from input");
    }

    let mut extractor = GoExtractor::new();

    // Output package, fixed by the first file that contributes methods.
    let mut package = String::new();

    let mut type_order: Vec<String> = Vec::new();
    let mut method_lines: HashMap<String, Vec<String>> = HashMap::new();
    let mut type_docs: HashMap<String, String> = HashMap::new();
    let mut imports: Vec<String> = Vec::new();

    let mut seen_signatures: HashSet<String> = HashSet::new();
    let mut seen_imports: HashSet<String> = HashSet::new();

    for path in files {
        let src = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
            })?;

        let extraction = extractor
            .parse_source(&src, options.copy_type_docs, &package)
            .map_err(|e| {
                error!("file: {}", path.display());
                Error::Parse {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?;

        if extraction.methods.is_empty() {
            debug!("{}: no exported methods, skipped", path.display());
            continue;
        }

        if package.is_empty() {
            package = extraction.package.clone();
        }

        for import in &extraction.imports {
            if seen_imports.insert(import.clone()) {
                imports.push(import.clone());
            }
        }

        for (type_name, methods) in &extraction.methods {
            // Rebuilt on every touch: the last file declaring methods on a
            // type supplies its doc text.
            let original_doc = extraction
                .type_docs
                .get(type_name)
                .map(String::as_str)
                .unwrap_or_default();
            type_docs.insert(
                type_name.clone(),
                format!("{}\n{}", options.iface_comment, original_doc),
            );

            for method in methods {
                if !seen_signatures.insert(method.signature.clone()) {
                    continue;
                }
                if !method_lines.contains_key(type_name) {
                    type_order.push(type_name.clone());
                }
                method_lines
                    .entry(type_name.clone())
                    .or_default()
                    .extend(method.lines());
            }
        }
    }

    if method_lines.is_empty() {
        info!("no exported methods found, nothing to generate");
        return Ok(Vec::new());
    }

    let blocks: Vec<TypeBlock> = type_order
        .iter()
        .map(|name| TypeBlock {
            name: name.clone(),
            doc: type_docs.get(name).cloned().unwrap_or_default(),
            lines: method_lines.get(name).cloned().unwrap_or_default(),
        })
        .collect();

    let text = emit::render_interface(
        &options.comment,
        &package,
        &options.suffix,
        &blocks,
        &imports,
    );

    let normalized =
        normalize::format_source(&text, &NormalizeOptions::default()).map_err(|e| {
            error!("normalization failed: {e}");
            error!("pre-normalization text:\n{text}");
            error!(
                "emitter inputs: comment={:?} package={:?} suffix={:?} imports={:?}",
                options.comment, package, options.suffix, imports
            );
            Error::Normalize {
                message: e.to_string(),
            }
        })?;

    Ok(normalized.into_bytes())
}
