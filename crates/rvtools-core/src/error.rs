use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A source is structurally unusable (not a sheet object, a sheet that is
    /// not a list of rows, or a row that is not an object).
    #[error("Malformed input in {source_label} ({sheet}): {reason}")]
    MalformedInput {
        source_label: String,
        sheet: String,
        reason: String,
    },

    /// Nothing to analyze at all.
    #[error("Nothing to analyze: {0}")]
    EmptyInput(String),

    /// One entry of a comparison failed; wraps the underlying error.
    #[error("Source #{index} ({label}) failed: {source}")]
    SourceFailure {
        index: usize,
        label: String,
        #[source]
        source: Box<AnalyzerError>,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file exceeds the configured size ceiling.
    #[error("Input file {path} is {size} bytes, above the {limit} byte limit")]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// A JSON document could not be parsed or written.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Shorthand for [`AnalyzerError::MalformedInput`].
    pub fn malformed(
        source_label: impl Into<String>,
        sheet: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            source_label: source_label.into(),
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
