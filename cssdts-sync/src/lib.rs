//! # cssdts-sync
//!
//! Per-file build pipeline: transform → dirty check → write.
//!
//! Call [`Pipeline::process`] for each discovered stylesheet. Failures come
//! back as [`PipelineError`]; [`policy::decide`] turns them into an
//! [`Action`] for the active run mode.

pub mod dirty;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod writer;

pub use dirty::{DirtyChecker, DirtyState};
pub use error::{ErrorKind, PipelineError};
pub use pipeline::{FileOutcome, Pipeline};
pub use policy::{decide, Action};
pub use writer::{write_artifact, WriteResult};
