//! Error types for the catalogue parser.
//!
//! Uses the dual-error pattern: `CatalogueError` for failures that abort a
//! run (unreadable input, unwritable output, bad configuration), and
//! `ParseError` for structural problems inside a single entry. A `ParseError`
//! never aborts a run; the entry is skipped and reported.

use thiserror::Error;

/// Main error type for the catalogue library.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular (CSV) reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input document is not a readable ZIP container.
    #[error("Invalid document container: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Vocabulary file could not be deserialized.
    #[error("Configuration file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Configuration is structurally invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No paragraph source exists for this input.
    #[error("Unsupported input '{0}'. Expected a .docx or .txt file")]
    UnsupportedSource(String),
}

/// Structural parse failure for one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Header line carries no year (no digit "1").
    #[error("Header '{header}' contains no year")]
    MissingYearDigit { header: String },

    /// Block ended before the trailing metadata line.
    #[error("Entry ends after paragraph {after_index} without a trailing metadata line")]
    MissingTrailingLine { after_index: usize },

    /// Trailing metadata line has fewer period-separated segments than needed.
    #[error("Trailing line '{line}' has fewer than {expected} period-separated segments")]
    MissingSegment { line: String, expected: usize },

    /// Block has no paragraphs at all.
    #[error("Entry block is empty")]
    EmptyBlock,
}

/// Result type alias for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;
