#![allow(dead_code)]

use std::sync::Arc;

use fireshell::config::{
    ConfigFile, PackageMetadata, PipelineConfig, RawConfigFile, TaskConfig, WatchBindingConfig,
};
use fireshell::registry::TaskRegistry;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_task(mut self, id: &str, task: TaskConfig) -> Self {
        self.config.task.insert(id.to_string(), task);
        self
    }

    /// Add a task that just echoes its id.
    pub fn with_echo_task(self, id: &str) -> Self {
        self.with_task(id, TaskConfigBuilder::new(&format!("echo {id}")).build())
    }

    pub fn with_pipeline(mut self, name: &str, tasks: &[&str]) -> Self {
        self.config.pipeline.insert(
            name.to_string(),
            PipelineConfig {
                tasks: tasks.iter().map(|s| s.to_string()).collect(),
                watch: false,
            },
        );
        self
    }

    pub fn with_watch_pipeline(mut self, name: &str, tasks: &[&str]) -> Self {
        self.config.pipeline.insert(
            name.to_string(),
            PipelineConfig {
                tasks: tasks.iter().map(|s| s.to_string()).collect(),
                watch: true,
            },
        );
        self
    }

    pub fn with_binding(mut self, name: &str, files: &[&str], tasks: &[&str], reload: bool) -> Self {
        self.config.watch.insert(
            name.to_string(),
            WatchBindingConfig {
                files: files.iter().map(|s| s.to_string()).collect(),
                tasks: tasks.iter().map(|s| s.to_string()).collect(),
                reload,
            },
        );
        self
    }

    pub fn with_package(mut self, package: PackageMetadata) -> Self {
        self.config.package = package;
        self
    }

    pub fn with_banner_template(mut self, template: &str) -> Self {
        self.config.banner.template = Some(template.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Build straight into a shared registry rooted at `root`.
    pub fn registry(self, root: &str) -> Arc<TaskRegistry> {
        Arc::new(TaskRegistry::from_config(&self.build(), root))
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: Some(cmd.to_string()),
                ..TaskConfig::default()
            },
        }
    }

    /// Task using its kind's default command.
    pub fn default_command() -> Self {
        Self {
            task: TaskConfig::default(),
        }
    }

    /// Built-in clean task.
    pub fn clean(paths: &[&str]) -> Self {
        Self {
            task: TaskConfig {
                paths: paths.iter().map(|s| s.to_string()).collect(),
                ..TaskConfig::default()
            },
        }
    }

    pub fn input(mut self, pattern: &str) -> Self {
        self.task.inputs.push(pattern.to_string());
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.task.output = Some(path.to_string());
        self
    }

    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.task
            .options
            .insert(key.to_string(), toml::Value::String(value.to_string()));
        self
    }

    pub fn banner(mut self, val: bool) -> Self {
        self.task.banner = val;
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
