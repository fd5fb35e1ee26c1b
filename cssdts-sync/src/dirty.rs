//! Dirty detection for freshly generated artifacts.
//!
//! Decision order:
//! 1. `Forced` (force-rewrite configured)
//! 2. `Missing` (no declaration on disk yet)
//! 3. `Unreadable` (existing declaration could not be read or stat'ed)
//! 4. `Superseded` (declaration mtime moved during the save delay)
//! 5. `Changed` / `Unchanged` (content comparison)
//!
//! The save delay exists for editors that clear a file and rewrite it in two
//! separate filesystem events. Waiting gives the second event's pipeline the
//! chance to win instead of persisting the transient empty content.

use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use cssdts_core::{Artifact, Config};

/// Outcome of a dirty check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyState {
    Forced,
    Missing,
    Unreadable,
    Superseded,
    Changed,
    Unchanged,
}

impl DirtyState {
    /// Whether the artifact should be written.
    pub fn is_dirty(self) -> bool {
        !matches!(self, DirtyState::Superseded | DirtyState::Unchanged)
    }
}

/// Compares artifacts with what is already on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirtyChecker {
    force: bool,
}

impl DirtyChecker {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.force)
    }

    /// Classify `artifact`, suspending for up to `delay` before deciding.
    pub async fn check(&self, artifact: &Artifact, delay: Duration) -> DirtyState {
        if self.force {
            return DirtyState::Forced;
        }

        let path = artifact.output_path();
        let started = match modified(path).await {
            Ok(mtime) => mtime,
            Err(err) if err.kind() == ErrorKind::NotFound => return DirtyState::Missing,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "cannot stat declaration");
                return DirtyState::Unreadable;
            }
        };

        let existing = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return DirtyState::Missing,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "cannot read declaration");
                return DirtyState::Unreadable;
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
            match modified(path).await {
                Ok(mtime) if mtime != started => {
                    tracing::debug!(path = %path.display(), "declaration touched during save delay");
                    return DirtyState::Superseded;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "declaration vanished during save delay");
                    return DirtyState::Unreadable;
                }
            }
        }

        if existing == artifact.text() {
            DirtyState::Unchanged
        } else {
            DirtyState::Changed
        }
    }

    pub async fn is_dirty(&self, artifact: &Artifact, delay: Duration) -> bool {
        self.check(artifact, delay).await.is_dirty()
    }
}

async fn modified(path: &Path) -> std::io::Result<SystemTime> {
    tokio::fs::metadata(path).await?.modified()
}
