use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use fireshell::engine::TaskOutcome;
use fireshell::errors::Result;
use fireshell::exec::ExecutorBackend;
use fireshell::registry::TaskDefinition;
use fireshell::watch::Reloader;

/// A fake executor that:
/// - records which tasks were "run", in order
/// - reports `Success`, or `Failed(code)` for the configured task.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<String>>>,
    fail_on: Option<(String, i32)>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            fail_on: None,
        }
    }

    /// Make the task with this id report `Failed(code)`.
    pub fn failing_on(mut self, id: &str, code: i32) -> Self {
        self.fail_on = Some((id.to_string(), code));
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn run_task<'a>(
        &'a mut self,
        task: &'a TaskDefinition,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);
        let fail_on = self.fail_on.clone();

        Box::pin(async move {
            let id = task.id.to_string();
            executed.lock().unwrap().push(id.clone());

            Ok(match fail_on {
                Some((failing, code)) if failing == id => TaskOutcome::Failed(code),
                _ => TaskOutcome::Success,
            })
        })
    }
}

/// Reloader that records the changed files of every reload.
#[derive(Debug, Clone, Default)]
pub struct RecordingReloader {
    reloads: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingReloader {
    pub fn new(reloads: Arc<Mutex<Vec<Vec<String>>>>) -> Self {
        Self { reloads }
    }
}

impl Reloader for RecordingReloader {
    fn reload<'a>(&'a mut self, files: &'a [String]) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        let reloads = Arc::clone(&self.reloads);
        Box::pin(async move {
            reloads.lock().unwrap().push(files.to_vec());
        })
    }
}
