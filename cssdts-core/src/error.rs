//! Error types for cssdts-core.

use thiserror::Error;

/// Errors raised while validating a [`crate::Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The glob pattern was empty.
    #[error("glob pattern must not be empty")]
    EmptyPattern,

    /// The glob pattern was absolute; patterns are resolved against the search directory.
    #[error("glob pattern '{pattern}' must be relative to the search directory")]
    AbsolutePattern { pattern: String },
}
