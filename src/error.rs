//! Error types for extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an input unit or a whole run.
///
/// Structural absence (no rules part, no annotation block, ...) is never an
/// error; it is represented with `Option` or empty collections.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Reading an input file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export package is not a readable zip archive.
    #[error("failed to read export package '{path}': {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An export document could not be decoded at all.
    #[error("malformed export document '{unit}': {message}")]
    Malformed { unit: String, message: String },

    /// Input is neither an `.xpz` package nor an `.xml` export.
    #[error("unsupported input '{}': expected a .xpz or .xml file", .0.display())]
    UnsupportedInput(PathBuf),

    /// A path expression could not be compiled or evaluated.
    #[error("invalid query '{path}': {message}")]
    Query { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
