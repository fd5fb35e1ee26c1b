//! Atomic declaration writer.
//!
//! ## `write_artifact` protocol
//!
//! 1. Ensure the output's parent directory exists.
//! 2. Write the text to a uniquely named `.cssdts*.tmp` sibling.
//! 3. Rename onto the final path (atomic on POSIX).
//! 4. On rename failure, remove the temp file and report the error.
//!
//! Every call gets its own temp file, so overlapping writes of the same
//! declaration never rename each other's temp file away.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use cssdts_core::Artifact;

use crate::error::{io_err, PipelineError};

const TMP_PREFIX: &str = ".cssdts";
const TMP_SUFFIX: &str = ".tmp";

/// Outcome of the write step for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The declaration was written.
    Written { path: PathBuf },
    /// The write was skipped because the artifact was not dirty.
    Unchanged { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path } | WriteResult::Unchanged { path } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

/// Persist `artifact`'s text to its output path.
pub async fn write_artifact(artifact: &Artifact) -> Result<WriteResult, PipelineError> {
    let path = artifact.output_path();
    write_atomic(path, artifact.text()).await?;
    tracing::info!(
        path = %path.display(),
        source = %artifact.source_path().display(),
        fingerprint = %artifact.fingerprint(),
        "wrote declaration"
    );
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

async fn write_atomic(path: &Path, content: &str) -> Result<(), PipelineError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent)
        .await
        .map_err(|e| io_err(&parent, e))?;

    let target = path.to_path_buf();
    let content = content.to_string();
    tokio::task::spawn_blocking(move || persist_via_tmp(&parent, &target, &content))
        .await
        .map_err(|e| io_err(path, io::Error::new(io::ErrorKind::Other, e.to_string())))?
}

fn persist_via_tmp(dir: &Path, path: &Path, content: &str) -> Result<(), PipelineError> {
    let mut tmp = tempfile::Builder::new()
        .prefix(TMP_PREFIX)
        .suffix(TMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| io_err(dir, e))?;
    write_tmp(&mut tmp, content)?;
    // A failed persist hands the temp file back; dropping it removes it.
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;
    Ok(())
}

fn write_tmp(tmp: &mut NamedTempFile, content: &str) -> Result<(), PipelineError> {
    if let Err(e) = tmp.write_all(content.as_bytes()) {
        return Err(io_err(tmp.path(), e));
    }
    tmp.flush().map_err(|e| io_err(tmp.path(), e))
}
