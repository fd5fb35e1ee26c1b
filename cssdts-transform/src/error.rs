//! Error types for cssdts-transform.

use thiserror::Error;

/// Source content that cannot be turned into a declaration.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("unexpected '}}' at line {line}")]
    UnexpectedCloseBrace { line: usize },

    #[error("block opened at line {line} is never closed")]
    UnclosedBlock { line: usize },

    #[error("comment opened at line {line} is never closed")]
    UnterminatedComment { line: usize },

    #[error("string opened at line {line} is never closed")]
    UnterminatedString { line: usize },
}
