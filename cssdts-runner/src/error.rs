//! Error types for cssdts-runner.

use std::path::PathBuf;

use thiserror::Error;

use cssdts_core::ConfigError;
use cssdts_sync::PipelineError;

/// Pattern expansion or watch subscription failure.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to search {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to watch {root}: {source}")]
    Watch {
        root: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Error surface of a batch or watch run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A per-file failure that the error policy escalated.
    #[error(transparent)]
    Aborted(#[from] PipelineError),

    #[error("{task} task join failure: {message}")]
    Join { task: &'static str, message: String },
}
