//! Per-file pipeline shared by batch and watch runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cssdts_core::{Artifact, Config};
use cssdts_transform::Transformer;

use crate::dirty::DirtyChecker;
use crate::error::PipelineError;
use crate::writer::{write_artifact, WriteResult};

/// Result of one successful pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub write: WriteResult,
    /// Transformer diagnostics, to be reported after the write-or-skip.
    pub diagnostics: Vec<String>,
}

/// Transform → dirty check → write, for one source at a time.
///
/// Cheap to clone; every clone shares the same configuration and transformer.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    transformer: Arc<dyn Transformer>,
    checker: DirtyChecker,
    delay: Duration,
}

impl Pipeline {
    pub fn new(config: Arc<Config>, transformer: Arc<dyn Transformer>) -> Self {
        let checker = DirtyChecker::from_config(&config);
        let delay = config.effective_save_delay();
        Self {
            config,
            transformer,
            checker,
            delay,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read `source` and build its artifact.
    pub async fn transform(&self, source: &Path) -> Result<Artifact, PipelineError> {
        let resolved = self.resolve(source);
        let text = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|e| PipelineError::Read {
                path: resolved.clone(),
                source: e,
            })?;
        let transformed = self
            .transformer
            .transform(&resolved, &text)
            .map_err(|e| PipelineError::Transform {
                path: resolved.clone(),
                source: e,
            })?;
        Ok(Artifact::new(
            &self.config,
            resolved,
            &text,
            transformed.text,
            transformed.diagnostics,
        ))
    }

    /// Run the whole pipeline for `source`.
    pub async fn process(&self, source: &Path) -> Result<FileOutcome, PipelineError> {
        let artifact = self.transform(source).await?;

        let state = self.checker.check(&artifact, self.delay).await;
        let write = if state.is_dirty() {
            write_artifact(&artifact).await?
        } else {
            tracing::debug!(
                path = %artifact.output_path().display(),
                state = ?state,
                "skipping clean declaration"
            );
            WriteResult::Unchanged {
                path: artifact.output_path().to_path_buf(),
            }
        };

        Ok(FileOutcome {
            source: artifact.source_path().to_path_buf(),
            write,
            diagnostics: artifact.diagnostics().to_vec(),
        })
    }

    fn resolve(&self, source: &Path) -> PathBuf {
        if source.is_relative() {
            self.config.root_dir.join(source)
        } else {
            source.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use cssdts_transform::ClassTokenTransformer;
    use tempfile::TempDir;

    use super::*;

    fn pipeline(root: &Path, force: bool) -> Pipeline {
        let config = Config::new(root, ".").with_force(force);
        Pipeline::new(
            Arc::new(config),
            Arc::new(ClassTokenTransformer::new(false)),
        )
    }

    #[tokio::test]
    async fn relative_sources_resolve_against_root() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("a.css"), ".a {}").unwrap();

        let outcome = pipeline(root.path(), false)
            .process(Path::new("a.css"))
            .await
            .unwrap();
        assert!(outcome.write.is_written());
        assert_eq!(outcome.write.path(), root.path().join("a.css.d.ts"));
    }

    #[tokio::test]
    async fn missing_source_is_a_read_error() {
        let root = TempDir::new().unwrap();
        let err = pipeline(root.path(), false)
            .process(Path::new("nope.css"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }), "got: {err}");
        assert_eq!(err.kind(), crate::ErrorKind::Transform);
    }

    #[tokio::test]
    async fn diagnostics_survive_a_skipped_write() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("a.css"), ".ok {} .not-ok {}").unwrap();
        let pipeline = pipeline(root.path(), false);

        let first = pipeline.process(Path::new("a.css")).await.unwrap();
        let second = pipeline.process(Path::new("a.css")).await.unwrap();

        assert!(first.write.is_written());
        assert!(!second.write.is_written());
        assert_eq!(second.diagnostics.len(), 1);
    }
}
