// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The dispatcher talks to an `ExecutorBackend` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests
//! while keeping the production implementation here.
//!
//! - `RealExecutorBackend` runs external tools through the shell, performs
//!   the built-in `clean` deletion and prepends banners.
//! - Tests can provide their own `ExecutorBackend` that records which tasks
//!   were dispatched and reports a canned outcome.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::engine::TaskOutcome;
use crate::errors::{FireshellError, Result};
use crate::exec::banner::prepend_banner;
use crate::exec::clean::remove_paths;
use crate::exec::inputs::expand_inputs;
use crate::exec::shell::join_quoted;
use crate::exec::task_runner::run_command;
use crate::fs::FileSystem;
use crate::registry::{TaskAction, TaskDefinition};
use crate::template::Template;

/// Trait abstracting how a single task is executed.
///
/// Implementations run the task to completion before the returned future
/// resolves; the dispatcher never has more than one task in flight.
pub trait ExecutorBackend: Send {
    fn run_task<'a>(
        &'a mut self,
        task: &'a TaskDefinition,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + 'a>>;
}

/// Real executor backend used in production.
#[derive(Debug, Clone)]
pub struct RealExecutorBackend {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl RealExecutorBackend {
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    async fn run_inner(&self, task: &TaskDefinition) -> Result<TaskOutcome> {
        let label = task.id.to_string();

        let template = match &task.action {
            TaskAction::Clean { paths } => {
                let removed = remove_paths(self.fs.as_ref(), &self.root, paths)?;
                info!(task = %label, removed, "clean finished");
                return Ok(TaskOutcome::Success);
            }
            TaskAction::Command(template) => template,
        };

        let inputs = expand_inputs(self.fs.as_ref(), &self.root, &task.inputs)?;
        let cmd = render_command(template, &inputs).map_err(|key| {
            FireshellError::ConfigError(format!(
                "task '{label}': placeholder '{{{{ {key} }}}}' left unresolved"
            ))
        })?;

        if let Some(parent) = task
            .output
            .as_deref()
            .and_then(|o| self.root.join(o).parent().map(Path::to_path_buf))
        {
            self.fs.create_dir_all(&parent)?;
        }

        let mut envs = task.option_env();
        envs.push(("FIRESHELL_TASK".to_string(), label.clone()));

        let outcome = match run_command(&label, &cmd, &self.root, &envs).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(task = %label, error = %err, "task execution error");
                TaskOutcome::Failed(-1)
            }
        };

        if outcome == TaskOutcome::Success {
            self.apply_banner(task)?;
        }

        Ok(outcome)
    }

    fn apply_banner(&self, task: &TaskDefinition) -> Result<()> {
        let (Some(banner), Some(output)) = (task.banner.as_deref(), task.output.as_deref()) else {
            return Ok(());
        };

        let path = self.root.join(output);
        if !self.fs.is_file(&path) {
            warn!(task = %task.id, output = %output, "banner requested but output is not a file");
            return Ok(());
        }

        if prepend_banner(self.fs.as_ref(), &path, banner)? {
            debug!(task = %task.id, output = %output, "banner prepended");
        }
        Ok(())
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn run_task<'a>(
        &'a mut self,
        task: &'a TaskDefinition,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + 'a>> {
        Box::pin(self.run_inner(task))
    }
}

/// Substitute the expanded inputs into a resolved command template.
pub fn render_command(template: &Template, inputs: &[String]) -> std::result::Result<String, String> {
    template.render(|key| (key == "inputs").then(|| join_quoted(inputs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::types::{Profile, TaskId, TaskKind};
    use std::collections::BTreeMap;

    #[test]
    fn renders_inputs_quoted() {
        let t = Template::new("uglifyjs {{ inputs }} -o dist/js/scripts.min.js");
        let cmd = render_command(&t, &["src/js/a.js".into(), "src/js/b.js".into()]).unwrap();
        assert_eq!(cmd, "uglifyjs src/js/a.js src/js/b.js -o dist/js/scripts.min.js");
    }

    #[tokio::test]
    async fn clean_runs_without_spawning_a_process() {
        let fs = MockFileSystem::new();
        fs.add_file("./dist/css/styles.unprefixed.css", "x");

        let task = TaskDefinition {
            id: TaskId::new(TaskKind::Clean, Some(Profile::Dist)),
            action: TaskAction::Clean {
                paths: vec!["dist/css/styles.unprefixed.css".into()],
            },
            inputs: vec![],
            output: None,
            options: BTreeMap::new(),
            banner: None,
        };

        let mut backend = RealExecutorBackend::new(".", Arc::new(fs.clone()));
        let outcome = backend.run_task(&task).await.unwrap();

        assert_eq!(outcome, TaskOutcome::Success);
        assert!(!fs.exists(Path::new("./dist/css/styles.unprefixed.css")));
    }
}
