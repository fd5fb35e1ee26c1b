//! Watch run: process add/change events until interrupted.

use std::process::ExitCode;

use anyhow::{Context, Result};

use cssdts_runner::Orchestrator;

pub async fn run(orchestrator: &Orchestrator) -> Result<ExitCode> {
    let handle = match orchestrator.watch() {
        Ok(handle) => handle,
        Err(err) => {
            tracing::debug!(error = %err, "could not start watching");
            return Ok(ExitCode::FAILURE);
        }
    };

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for interrupt")?;
    tracing::debug!("interrupt received; closing watch");

    handle.close().await.context("watch shutdown failed")?;
    Ok(ExitCode::SUCCESS)
}
