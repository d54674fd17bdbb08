//! Interface generation for Go struct types
//!
//! Scans Go source files for methods bound to a receiver type and generates
//! one `interface` declaration per type, exposing its exported methods with
//! their documentation carried over. A development-time convenience, not a
//! runtime system: a single synchronous pipeline from file paths to one
//! normalized source blob.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod render;

pub use aggregate::{merge_files, MergeOptions};
pub use config::{Config, GenerateConfig};
pub use error::Error;
pub use extract::{FileExtraction, GoExtractor, Method};

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use error::Result;

/// Main entry point coordinating source discovery and aggregation.
pub struct InterfaceGenerator {
    options: MergeOptions,
}

impl InterfaceGenerator {
    /// Create a generator with the given merge options
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Generate interface source for the given files or directories.
    ///
    /// Directories are expanded recursively to `.go` files, in path order,
    /// with `_test.go` files excluded. The result is the normalized blob, or
    /// empty when no exported methods were found anywhere.
    pub async fn generate(&self, inputs: &[PathBuf]) -> Result<Vec<u8>> {
        let files = expand_inputs(inputs)?;
        debug!("expanded {} input(s) to {} file(s)", inputs.len(), files.len());
        merge_files(&files, &self.options).await
    }
}

/// Expand file and directory inputs to an ordered list of Go source files.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(|e| walk_error(input, e))?;
                if entry.file_type().is_file() && is_go_source(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    Ok(files)
}

fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

fn walk_error(input: &Path, e: walkdir::Error) -> Error {
    let path = e.path().unwrap_or(input).to_path_buf();
    Error::FileRead {
        path,
        source: e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory traversal failed")),
    }
}
