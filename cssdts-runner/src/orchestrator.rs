//! Batch and watch orchestration.
//!
//! Both modes push each source through the shared [`Pipeline`] as an
//! independent task. A failure is reported, then handed to
//! [`cssdts_sync::decide`]: batch runs abort (cancelling in-flight siblings),
//! watch runs keep going.
//!
//! A watch run first processes every source that already matches, then
//! every add/change event after that.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Instant;

use cssdts_core::{Config, RunMode};
use cssdts_sync::{decide, Action, FileOutcome, Pipeline, PipelineError};
use cssdts_transform::Transformer;

use crate::discovery::{Discovery, Subscription};
use crate::error::RunError;
use crate::reporter::{Report, Reporter};

/// Totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub discovered: usize,
    pub written: usize,
    pub unchanged: usize,
    pub duration_ms: u128,
}

impl BatchSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        if outcome.write.is_written() {
            self.written += 1;
        } else {
            self.unchanged += 1;
        }
    }
}

/// Drives discovery, the per-file pipeline, reporting and the error policy.
#[derive(Clone)]
pub struct Orchestrator {
    pipeline: Pipeline,
    reporter: Arc<dyn Reporter>,
}

impl Orchestrator {
    /// Validate `config` and bind it for the lifetime of the orchestrator.
    pub fn new(
        config: Config,
        transformer: Arc<dyn Transformer>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, RunError> {
        config.validate()?;
        Ok(Self {
            pipeline: Pipeline::new(Arc::new(config), transformer),
            reporter,
        })
    }

    pub fn config(&self) -> &Config {
        self.pipeline.config()
    }

    /// Expand the configured pattern and process every match.
    pub async fn run_batch(&self) -> Result<BatchSummary, RunError> {
        let paths = Discovery::from_config(self.config())
            .and_then(|discovery| discovery.expand())
            .map_err(|err| self.fail(err.into()))?;
        self.run_paths(paths).await
    }

    /// Process `paths` concurrently under the batch error policy.
    pub async fn run_paths(&self, paths: Vec<PathBuf>) -> Result<BatchSummary, RunError> {
        let started = Instant::now();
        let mut summary = BatchSummary {
            discovered: paths.len(),
            ..BatchSummary::default()
        };

        let mut tasks = JoinSet::new();
        for path in paths {
            let this = self.clone();
            tasks.spawn(async move { this.process_file(&path, RunMode::Batch).await });
        }

        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(err) => {
                    tasks.abort_all();
                    return Err(self.fail(RunError::Join {
                        task: "batch",
                        message: err.to_string(),
                    }));
                }
            };
            match result {
                Ok(Some(outcome)) => summary.record(&outcome),
                // Reported already; the policy let it through.
                Ok(None) => {}
                Err(err) => {
                    tasks.abort_all();
                    return Err(RunError::Aborted(err));
                }
            }
        }

        summary.duration_ms = started.elapsed().as_millis();
        tracing::info!(
            discovered = summary.discovered,
            written = summary.written,
            unchanged = summary.unchanged,
            duration_ms = summary.duration_ms,
            "batch completed",
        );
        Ok(summary)
    }

    /// Subscribe to the configured pattern, process every source that
    /// already matches, then every add/change.
    ///
    /// The subscription is established before the initial scan so that no
    /// edit made in between is missed.
    pub fn watch(&self) -> Result<WatchHandle, RunError> {
        let (subscription, existing) = Discovery::from_config(self.config())
            .and_then(|discovery| {
                let subscription = discovery.subscribe()?;
                let existing = discovery.expand()?;
                Ok((subscription, existing))
            })
            .map_err(|err| self.fail(err.into()))?;
        tracing::debug!(existing = existing.len(), "initial watch scan");
        Ok(self.spawn_watch(subscription, existing))
    }

    /// Run the watch loop over an already established subscription.
    pub fn watch_subscription(&self, subscription: Subscription) -> WatchHandle {
        self.spawn_watch(subscription, Vec::new())
    }

    fn spawn_watch(&self, subscription: Subscription, existing: Vec<PathBuf>) -> WatchHandle {
        self.emit(Report::Watching(self.config().display_pattern()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let this = self.clone();
        let task = tokio::spawn(async move {
            for path in existing {
                this.dispatch(path);
            }
            this.event_loop(subscription, shutdown_rx).await
        });
        WatchHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    async fn event_loop(
        self,
        mut subscription: Subscription,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<(), RunError> {
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                event = subscription.next() => {
                    let Some(event) = event else { break };
                    tracing::debug!(event = ?event, "source event");
                    self.dispatch(event.path().to_path_buf());
                }
            }
        }

        tracing::debug!("watch loop stopped");
        Ok(())
    }

    /// Detached watch-mode pipeline for one source.
    fn dispatch(&self, path: PathBuf) {
        let this = self.clone();
        tokio::spawn(async move {
            // Watch failures are reported in process_file and never stop the loop.
            let _ = this.process_file(&path, RunMode::Watch).await;
        });
    }

    /// One pipeline invocation plus reporting. `Err` means the policy aborts.
    async fn process_file(
        &self,
        path: &Path,
        mode: RunMode,
    ) -> Result<Option<FileOutcome>, PipelineError> {
        match self.pipeline.process(path).await {
            Ok(outcome) => {
                self.report_outcome(&outcome);
                Ok(Some(outcome))
            }
            Err(err) => {
                tracing::error!(
                    path = %err.path().display(),
                    mode = %mode,
                    error = %err,
                    "pipeline failed",
                );
                self.emit(Report::Error(err.to_string()));
                match decide(mode, &err) {
                    Action::Abort => Err(err),
                    Action::Continue => Ok(None),
                }
            }
        }
    }

    fn report_outcome(&self, outcome: &FileOutcome) {
        if outcome.write.is_written() {
            self.emit(Report::Wrote(outcome.write.path().to_path_buf()));
        }
        for message in &outcome.diagnostics {
            self.emit(Report::Warn {
                source: outcome.source.clone(),
                message: message.clone(),
            });
        }
    }

    fn fail(&self, err: RunError) -> RunError {
        self.emit(Report::Error(err.to_string()));
        err
    }

    fn emit(&self, report: Report) {
        if !self.config().quiet {
            self.reporter.report(report);
        }
    }
}

// ---------------------------------------------------------------------------
// WatchHandle
// ---------------------------------------------------------------------------

/// Handle to a running watch loop. Dropping it also stops the loop.
pub struct WatchHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), RunError>>,
}

impl WatchHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop receiving events and wait for the loop to exit.
    ///
    /// Pipelines already in flight are not awaited.
    pub async fn close(mut self) -> Result<(), RunError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        join(self.task).await
    }

    /// Wait for the loop to end on its own (event source exhausted).
    pub async fn finished(self) -> Result<(), RunError> {
        let WatchHandle { shutdown, task } = self;
        let result = join(task).await;
        drop(shutdown);
        result
    }
}

async fn join(task: JoinHandle<Result<(), RunError>>) -> Result<(), RunError> {
    task.await.map_err(|err| RunError::Join {
        task: "watch",
        message: err.to_string(),
    })?
}
