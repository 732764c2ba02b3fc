//! Error types for foam-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in foam-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tab-separated parsing error from the csv crate
    #[error("parse error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// No comment block ending in a column-name row
    #[error("malformed header in '{path}': {reason}")]
    MalformedHeader { path: PathBuf, reason: String },

    /// Tuple cells of differing width within one column
    #[error(
        "inconsistent component count in column '{column}': expected {expected}, found {found} at row {row}"
    )]
    InconsistentComponentCount {
        column: String,
        expected: usize,
        found: usize,
        row: usize,
    },

    /// Directory merge over files with different names
    #[error("directory '{path}' mixes data files with different names: {}", .names.join(", "))]
    HeterogeneousDirectory { path: PathBuf, names: Vec<String> },

    /// Directory merge found nothing to load
    #[error("no .{extension} files found below '{path}'")]
    NoDataFiles { path: PathBuf, extension: String },

    /// Column count cannot be reconciled with the filename tokens
    #[error("cannot infer column names for '{stem}' with {column_count} columns: {reason}")]
    NameInference {
        stem: String,
        column_count: usize,
        reason: String,
    },

    /// Inferred names disagree with the column count
    #[error("inferred {found} column names for '{stem}', expected {expected}")]
    NameCountMismatch {
        stem: String,
        expected: usize,
        found: usize,
    },

    /// Cell that is neither a number nor a tuple of numbers
    #[error("invalid cell '{value}' in column '{column}' at {path}:{line}")]
    InvalidCell {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// Row whose field count disagrees with the column names
    #[error("row at {path}:{line} has {found} fields, expected {expected}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Requested column position outside the file
    #[error("column position {position} is out of range (1..={last})")]
    ColumnOutOfRange { position: usize, last: usize },

    /// Column name appears more than once
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Column length differs from the index length
    #[error("column '{column}' has {found} values, index has {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// File name is missing or not valid UTF-8
    #[error("invalid file name: {0}")]
    InvalidFileName(PathBuf),

    /// Requested line does not exist
    #[error("line {line} not found in '{path}'")]
    LineNotFound { path: PathBuf, line: usize },

    /// Path is neither a directory nor a known data file
    #[error("unsupported data file: {0}")]
    UnsupportedFormat(PathBuf),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
