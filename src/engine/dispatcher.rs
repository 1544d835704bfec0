// src/engine/dispatcher.rs

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::engine::TaskOutcome;
use crate::engine::report::PipelineReport;
use crate::errors::{FireshellError, Result};
use crate::exec::ExecutorBackend;
use crate::registry::TaskRegistry;
use crate::types::TaskId;

/// Runs task lists strictly in order through an [`ExecutorBackend`].
///
/// The dispatcher owns the executor and shares the immutable registry with
/// the watch loop. It never runs two tasks at once: each task is awaited to
/// completion before the next one starts, and the first failure aborts the
/// rest of the list. Nothing is rolled back.
#[derive(Debug)]
pub struct Dispatcher<E> {
    registry: Arc<TaskRegistry>,
    executor: E,
}

impl<E: ExecutorBackend> Dispatcher<E> {
    pub fn new(registry: Arc<TaskRegistry>, executor: E) -> Self {
        Self { registry, executor }
    }

    pub fn registry(&self) -> &Arc<TaskRegistry> {
        &self.registry
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the named pipeline.
    ///
    /// An undeclared name is a `ConfigError` and no task is invoked.
    pub async fn run_pipeline(&mut self, name: &str) -> Result<PipelineReport> {
        let tasks = self.registry.pipeline(name)?.tasks.clone();
        info!(pipeline = %name, tasks = tasks.len(), "running pipeline");
        self.run_tasks(name, &tasks).await
    }

    /// Run an ad-hoc task list (watch bindings, `--task`).
    ///
    /// Every id is resolved before the first task starts, so a bad
    /// reference never leaves a half-run list behind.
    pub async fn run_tasks(&mut self, label: &str, ids: &[TaskId]) -> Result<PipelineReport> {
        let registry = Arc::clone(&self.registry);
        let tasks = registry.resolve_tasks(ids)?;

        let mut report = PipelineReport::new(label);

        for task in tasks {
            let started = Instant::now();
            info!(pipeline = %label, task = %task.id, "running task");

            let outcome = self.executor.run_task(task).await?;
            let elapsed = started.elapsed();

            match outcome {
                TaskOutcome::Success => {
                    info!(
                        task = %task.id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "task finished"
                    );
                    report.record(task.id, elapsed);
                }
                TaskOutcome::Failed(code) => {
                    error!(
                        pipeline = %label,
                        task = %task.id,
                        exit_code = code,
                        "task failed; aborting remaining tasks"
                    );
                    return Err(FireshellError::ExternalToolError {
                        task: task.id.to_string(),
                        code,
                    });
                }
            }
        }

        Ok(report)
    }
}
