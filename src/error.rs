//! Error types for interface generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a generation run.
///
/// Every variant is fatal to the run: the aggregator never produces partial
/// output, the first failure is returned to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Go.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The assembled interface text failed the final formatting pass.
    ///
    /// This usually indicates a bug in signature assembly rather than bad
    /// input; the aggregator logs the pre-normalization text for diagnosis.
    #[error("generated code failed normalization: {message}")]
    Normalize { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
