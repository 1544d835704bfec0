// src/registry/definitions.rs

//! Static task, pipeline and watch-binding descriptors.

use std::collections::BTreeMap;

use crate::template::Template;
use crate::types::TaskId;

/// What running a task actually does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Run an external tool through the shell.
    ///
    /// Every load-time placeholder is already resolved; the only key left
    /// for dispatch time is `{{ inputs }}`.
    Command(Template),
    /// Built-in deletion of generated files or globs.
    Clean { paths: Vec<String> },
}

/// A fully resolved task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub id: TaskId,
    pub action: TaskAction,
    /// Input files/globs relative to the project root. Globs are expanded
    /// at dispatch time, so earlier tasks' outputs are visible.
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub options: BTreeMap<String, String>,
    /// Rendered banner to prepend to `output` after success.
    pub banner: Option<String>,
}

impl TaskDefinition {
    /// Options as `FIRESHELL_OPTION_<KEY>` environment variables.
    pub fn option_env(&self) -> Vec<(String, String)> {
        self.options
            .iter()
            .map(|(k, v)| (option_env_name(k), v.clone()))
            .collect()
    }
}

fn option_env_name(key: &str) -> String {
    let key: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("FIRESHELL_OPTION_{key}")
}

/// Ordered task list run as one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub name: String,
    pub tasks: Vec<TaskId>,
    /// Enter the watch loop after the tasks succeed.
    pub watch: bool,
}

/// File patterns mapped to the tasks re-run when a matching file changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchBinding {
    pub name: String,
    pub files: Vec<String>,
    pub tasks: Vec<TaskId>,
    pub reload: bool,
}
