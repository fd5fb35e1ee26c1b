//! Error types for cssdts-sync.

use std::path::{Path, PathBuf};

use thiserror::Error;

use cssdts_transform::TransformError;

/// Coarse classification used by reporting and the error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be turned into an artifact.
    Transform,
    /// The declaration could not be written.
    Io,
}

/// Everything that can fail inside one per-file pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source stylesheet could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but its content is malformed.
    #[error("failed to transform {path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },

    /// Writing the declaration failed, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Read { .. } | PipelineError::Transform { .. } => ErrorKind::Transform,
            PipelineError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Path the failure is attributed to.
    pub fn path(&self) -> &Path {
        match self {
            PipelineError::Read { path, .. }
            | PipelineError::Transform { path, .. }
            | PipelineError::Io { path, .. } => path,
        }
    }
}

/// Convenience constructor for [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}
