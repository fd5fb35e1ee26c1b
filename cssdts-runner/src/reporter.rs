//! User-facing reporting channels.
//!
//! The orchestrator emits [`Report`]s for the standard channel (`Wrote`,
//! `Watching`), the warning channel (`Warn`) and the error channel (`Error`).
//! Quiet runs never reach the reporter.

use std::path::PathBuf;
use std::sync::Mutex;

/// One user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Watch mode has started for the given display pattern.
    Watching(String),
    /// A declaration was written.
    Wrote(PathBuf),
    /// A transformer diagnostic for a source.
    Warn { source: PathBuf, message: String },
    /// A per-file or run-level failure.
    Error(String),
}

/// Sink for [`Report`]s.
pub trait Reporter: Send + Sync {
    fn report(&self, report: Report);
}

/// Collects reports in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn written(&self) -> Vec<PathBuf> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                Report::Wrote(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                Report::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, report: Report) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}
