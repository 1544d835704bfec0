// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::metadata::PackageMetadata;
use crate::registry::{Pipeline, TaskDefinition, WatchBinding};
use crate::template::Template;
use crate::types::TaskId;

/// Top-level configuration as read from `Fireshell.toml`.
///
/// ```toml
/// [project]
/// src = "src"
/// dist = "dist"
/// css = ["{{ project.src }}/scss/styles.scss"]
/// js = ["{{ project.src }}/js/*.js"]
///
/// [task."sass:dist"]
/// inputs = ["{{ project.css }}"]
/// output = "{{ project.dist }}/css/styles.css"
///
/// [pipeline.build]
/// tasks = ["sass:dist"]
///
/// [watch.styles]
/// files = ["{{ project.src }}/scss/**/*.scss"]
/// tasks = ["sass:dist"]
/// reload = true
/// ```
///
/// This is the raw, unchecked shape. Convert it with
/// `ConfigFile::try_from(raw)` to validate references and resolve
/// placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub project: ProjectSection,

    /// Project metadata for the banner. Overrides `package.json` values.
    #[serde(default)]
    pub package: PackageMetadata,

    #[serde(default)]
    pub banner: BannerSection,

    #[serde(default)]
    pub livereload: LiveReloadSection,

    /// All tasks from `[task."<kind>:<profile>"]`, keyed by the raw id.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,

    /// Named pipelines from `[pipeline.<name>]`.
    #[serde(default)]
    pub pipeline: BTreeMap<String, PipelineConfig>,

    /// Watch bindings from `[watch.<name>]`.
    #[serde(default)]
    pub watch: BTreeMap<String, WatchBindingConfig>,
}

/// `[project]` section: source/output roots and entry lists.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_src")]
    pub src: String,

    #[serde(default = "default_dist")]
    pub dist: String,

    /// Stylesheet entry files, referenced as `{{ project.css }}`.
    #[serde(default)]
    pub css: Vec<String>,

    /// Script glob patterns, referenced as `{{ project.js }}`.
    #[serde(default)]
    pub js: Vec<String>,

    /// Optional `package.json` to read banner metadata from, relative to the
    /// config file.
    #[serde(default)]
    pub package_json: Option<String>,
}

fn default_src() -> String {
    "src".to_string()
}

fn default_dist() -> String {
    "dist".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            src: default_src(),
            dist: default_dist(),
            css: Vec::new(),
            js: Vec::new(),
            package_json: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerSection {
    /// Falls back to [`crate::template::DEFAULT_BANNER`].
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveReloadSection {
    /// Shell command run to signal a browser reload. `{{ files }}` expands
    /// to the comma-separated changed paths. Without it, reloads are only
    /// logged.
    #[serde(default)]
    pub cmd: Option<String>,
}

/// `[task."<id>"]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// Command template; defaults to the kind's standard tool invocation.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Input files or globs, relative to the project root.
    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub output: Option<String>,

    /// Files or globs to delete (`clean` tasks only).
    #[serde(default)]
    pub paths: Vec<String>,

    /// Prepend the rendered banner to `output` after the tool succeeds.
    #[serde(default)]
    pub banner: bool,

    /// Tool options, passed through as `--key=value` flags and
    /// `FIRESHELL_OPTION_<KEY>` environment variables.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

/// `[pipeline.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    pub tasks: Vec<String>,

    /// Enter the watch loop once every task has succeeded.
    #[serde(default)]
    pub watch: bool,
}

/// `[watch.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchBindingConfig {
    pub files: Vec<String>,

    #[serde(default)]
    pub tasks: Vec<String>,

    #[serde(default)]
    pub reload: bool,
}

/// Validated configuration with every reference checked and every
/// load-time placeholder resolved.
///
/// Only constructed through `TryFrom<RawConfigFile>`; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub project: ProjectSection,
    pub package: PackageMetadata,
    /// Rendered banner, present when at least one task asks for it.
    pub banner: Option<String>,
    pub livereload: Option<Template>,
    pub tasks: BTreeMap<TaskId, TaskDefinition>,
    pub pipelines: BTreeMap<String, Pipeline>,
    pub bindings: Vec<WatchBinding>,
}
