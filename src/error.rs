//! Error types for language tables and per-file analysis.

use thiserror::Error;

/// A defect in a language definition table.
///
/// These are configuration errors. They surface when a table is built,
/// never while files are being analyzed.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("language {language:?}: {kind} pattern does not compile: {source}")]
    InvalidPattern {
        language: String,
        kind: String,
        #[source]
        source: regex::Error,
    },
    #[error("language {language:?}: {kind} pattern {pattern:?} has no capturing group")]
    MissingCaptureGroup {
        language: String,
        kind: String,
        pattern: String,
    },
    #[error("language {0:?} declares no file extensions")]
    EmptyExtensions(String),
    #[error("language {0:?} declares no patterns")]
    EmptyPatterns(String),
    #[error("language {0:?} is defined more than once")]
    DuplicateLanguage(String),
    #[error("extension {extension:?} must be lowercase without a leading dot (language {language:?})")]
    InvalidExtension { language: String, extension: String },
    #[error("extension {extension:?} is claimed by both {first} and {second}")]
    OverlappingExtension {
        extension: String,
        first: String,
        second: String,
    },
}

/// A failure while analyzing a single file.
///
/// The repository aggregator records these per file and keeps going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("content looks binary (contains NUL bytes)")]
    Binary,
    #[error("analyzer panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Other(String),
}
