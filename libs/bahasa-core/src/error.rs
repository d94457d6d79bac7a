//! Error types for bahasa-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Result type alias for the vocabulary-list importer.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Contract violations raised at the call boundary.
///
/// Linguistic ambiguity is never an error: the analyzer degrades to identity
/// stemming and the evaluator to low similarity instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no acceptable answer supplied")]
    NoAcceptableAnswer,

    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown item {0}")]
    UnknownItem(i64),
}

/// Errors that can occur while parsing a vocabulary list.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing translation at line {line}")]
    MissingTranslation { line: usize },

    #[error("invalid difficulty at line {line}: {value}")]
    InvalidDifficulty { line: usize, value: String },

    #[error("invalid frequency at line {line}: {value}")]
    InvalidFrequency { line: usize, value: String },

    #[error("duplicate entry '{surface}' at line {line}")]
    DuplicateEntry { surface: String, line: usize },
}
