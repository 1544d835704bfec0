// src/registry/task_registry.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::errors::{FireshellError, Result};
use crate::registry::definitions::{Pipeline, TaskDefinition, WatchBinding};
use crate::types::TaskId;

/// Read-only lookup tables shared by the dispatcher and the watch loop.
///
/// Built once from a validated [`ConfigFile`] plus the project root that
/// tasks run in.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    root: PathBuf,
    tasks: BTreeMap<TaskId, TaskDefinition>,
    pipelines: BTreeMap<String, Pipeline>,
    bindings: Vec<WatchBinding>,
}

impl TaskRegistry {
    pub fn from_config(cfg: &ConfigFile, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tasks: cfg.tasks.clone(),
            pipelines: cfg.pipelines.clone(),
            bindings: cfg.bindings.clone(),
        }
    }

    /// Project root; tools run with this as their working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn task(&self, id: &TaskId) -> Option<&TaskDefinition> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.tasks.values()
    }

    pub fn bindings(&self) -> &[WatchBinding] {
        &self.bindings
    }

    /// Look up a pipeline by name.
    pub fn pipeline(&self, name: &str) -> Result<&Pipeline> {
        self.pipelines.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.pipelines.keys().map(String::as_str).collect();
            FireshellError::ConfigError(format!(
                "unknown pipeline '{}' (declared: {})",
                name,
                if known.is_empty() { "none".to_string() } else { known.join(", ") }
            ))
        })
    }

    /// Resolve every id up front so a bad reference fails before anything
    /// runs.
    pub fn resolve_tasks(&self, ids: &[TaskId]) -> Result<Vec<&TaskDefinition>> {
        ids.iter()
            .map(|id| {
                self.tasks.get(id).ok_or_else(|| {
                    FireshellError::ConfigError(format!("task '{id}' is not declared"))
                })
            })
            .collect()
    }

    /// Parse task ids given on the command line and check they exist.
    pub fn parse_task_ids(&self, names: &[String]) -> Result<Vec<TaskId>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id: TaskId = name
                .parse()
                .map_err(FireshellError::ConfigError)?;
            if !self.tasks.contains_key(&id) {
                return Err(FireshellError::ConfigError(format!(
                    "task '{id}' is not declared"
                )));
            }
            ids.push(id);
        }
        Ok(ids)
    }
}
