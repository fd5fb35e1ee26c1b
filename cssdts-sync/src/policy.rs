//! Error policy: what a per-file failure means for the whole run.

use cssdts_core::RunMode;

use crate::error::PipelineError;

/// What the orchestrator does after a per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and exit non-zero.
    Abort,
    /// Log and keep processing.
    Continue,
}

/// Map a failure to an [`Action`]. Batch runs abort on the first bad file;
/// watch runs never stop because of one.
pub fn decide(mode: RunMode, _error: &PipelineError) -> Action {
    match mode {
        RunMode::Batch => Action::Abort,
        RunMode::Watch => Action::Continue,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cssdts_transform::TransformError;

    use super::*;
    use crate::error::io_err;

    fn errors() -> Vec<PipelineError> {
        vec![
            PipelineError::Transform {
                path: PathBuf::from("b.css"),
                source: TransformError::UnclosedBlock { line: 1 },
            },
            io_err(
                "b.css.d.ts",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
        ]
    }

    #[test]
    fn batch_aborts_on_every_error_kind() {
        for err in errors() {
            assert_eq!(decide(RunMode::Batch, &err), Action::Abort, "{err}");
        }
    }

    #[test]
    fn watch_continues_on_every_error_kind() {
        for err in errors() {
            assert_eq!(decide(RunMode::Watch, &err), Action::Continue, "{err}");
        }
    }
}
