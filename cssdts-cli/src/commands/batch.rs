//! One-shot run: process every match, exit non-zero on the first failure.

use std::process::ExitCode;

use anyhow::Result;

use cssdts_runner::Orchestrator;

pub async fn run(orchestrator: &Orchestrator) -> Result<ExitCode> {
    match orchestrator.run_batch().await {
        Ok(summary) => {
            tracing::debug!(
                written = summary.written,
                unchanged = summary.unchanged,
                "batch finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        // Already on the error channel via the reporter.
        Err(err) => {
            tracing::debug!(error = %err, "batch aborted");
            Ok(ExitCode::FAILURE)
        }
    }
}
