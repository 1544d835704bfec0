// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::metadata::PackageMetadata;
use crate::config::model::{ConfigFile, ProjectSection, RawConfigFile, TaskConfig};
use crate::errors::{FireshellError, Result};
use crate::exec::shell::shell_quote;
use crate::registry::{Pipeline, TaskAction, TaskDefinition, WatchBinding};
use crate::template::{render_banner, sole_placeholder, Template, DEFAULT_BANNER};
use crate::types::TaskId;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = FireshellError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;

        let project = resolve_project(&raw.project, &raw.package)?;
        let ctx = LoadContext {
            project: &project,
            package: &raw.package,
        };

        let banner = resolve_banner(&raw)?;
        let tasks = resolve_tasks(&raw, &ctx, banner.as_deref())?;
        let pipelines = resolve_pipelines(&raw, &tasks)?;
        let bindings = resolve_bindings(&raw, &ctx, &tasks)?;
        ensure_watch_pipelines_have_bindings(&pipelines, &bindings)?;
        let livereload = resolve_livereload(&raw, &ctx)?;

        Ok(ConfigFile {
            project,
            package: raw.package,
            banner,
            livereload,
            tasks,
            pipelines,
            bindings,
        })
    }
}

/// Values available to load-time placeholders.
struct LoadContext<'a> {
    project: &'a ProjectSection,
    package: &'a PackageMetadata,
}

impl LoadContext<'_> {
    fn scalar(&self, key: &str) -> Option<String> {
        match key {
            "project.src" => Some(self.project.src.clone()),
            "project.dist" => Some(self.project.dist.clone()),
            _ => key
                .strip_prefix("pkg.")
                .and_then(|field| self.package.field(field))
                .map(str::to_string),
        }
    }

    fn list(&self, key: &str) -> Option<&[String]> {
        match key {
            "project.css" => Some(&self.project.css),
            "project.js" => Some(&self.project.js),
            _ => None,
        }
    }
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(FireshellError::ConfigError(
            "config must contain at least one [task.\"<id>\"] section".to_string(),
        ));
    }
    Ok(())
}

fn expand_scalar(ctx: &LoadContext<'_>, what: &str, value: &str) -> Result<String> {
    Template::new(value)
        .render(|key| ctx.scalar(key))
        .map_err(|key| unknown_placeholder(what, &key))
}

/// Expand a list, splicing whole-entry list placeholders like
/// `"{{ project.css }}"`.
fn expand_list(ctx: &LoadContext<'_>, what: &str, entries: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(list) = sole_placeholder(entry).and_then(|key| ctx.list(key)) {
            out.extend(list.iter().cloned());
            continue;
        }
        out.push(expand_scalar(ctx, what, entry)?);
    }
    Ok(out)
}

fn unknown_placeholder(what: &str, key: &str) -> FireshellError {
    FireshellError::ConfigError(format!(
        "{what}: placeholder '{{{{ {key} }}}}' cannot be resolved"
    ))
}

fn resolve_project(raw: &ProjectSection, package: &PackageMetadata) -> Result<ProjectSection> {
    let src = raw.src.trim_end_matches('/').to_string();
    let dist = raw.dist.trim_end_matches('/').to_string();
    if src.is_empty() || dist.is_empty() {
        return Err(FireshellError::ConfigError(
            "[project].src and [project].dist must not be empty".to_string(),
        ));
    }

    // Lists may only reference scalars; resolve them against src/dist first.
    let scalars = ProjectSection {
        src,
        dist,
        css: Vec::new(),
        js: Vec::new(),
        package_json: raw.package_json.clone(),
    };
    let ctx = LoadContext {
        project: &scalars,
        package,
    };

    let css = raw
        .css
        .iter()
        .map(|e| expand_scalar(&ctx, "[project].css", e))
        .collect::<Result<Vec<_>>>()?;
    let js = raw
        .js
        .iter()
        .map(|e| expand_scalar(&ctx, "[project].js", e))
        .collect::<Result<Vec<_>>>()?;

    Ok(ProjectSection {
        css,
        js,
        ..scalars
    })
}

fn resolve_banner(cfg: &RawConfigFile) -> Result<Option<String>> {
    if !cfg.task.values().any(|t| t.banner) {
        return Ok(None);
    }
    let template = cfg.banner.template.as_deref().unwrap_or(DEFAULT_BANNER);
    render_banner(template, &cfg.package).map(Some)
}

fn resolve_tasks(
    cfg: &RawConfigFile,
    ctx: &LoadContext<'_>,
    banner: Option<&str>,
) -> Result<BTreeMap<TaskId, TaskDefinition>> {
    let mut tasks = BTreeMap::new();
    for (raw_id, task) in cfg.task.iter() {
        let def = resolve_task(raw_id, task, ctx, banner)?;
        if tasks.contains_key(&def.id) {
            return Err(FireshellError::ConfigError(format!(
                "task '{}' is declared more than once",
                def.id
            )));
        }
        tasks.insert(def.id, def);
    }
    Ok(tasks)
}

fn resolve_task(
    raw_id: &str,
    task: &TaskConfig,
    ctx: &LoadContext<'_>,
    banner: Option<&str>,
) -> Result<TaskDefinition> {
    let id: TaskId = raw_id
        .parse()
        .map_err(|e| FireshellError::ConfigError(format!("[task.\"{raw_id}\"]: {e}")))?;
    let what = format!("task '{id}'");

    let inputs = expand_list(ctx, &what, &task.inputs)?;
    let output = task
        .output
        .as_deref()
        .map(|o| expand_scalar(ctx, &what, o))
        .transpose()?;

    let mut options = BTreeMap::new();
    for (key, value) in task.options.iter() {
        let value = option_value_string(value).map_err(|kind| {
            FireshellError::ConfigError(format!(
                "{what}: option '{key}' must be a string, number, boolean or array (got {kind})"
            ))
        })?;
        let value = expand_scalar(ctx, &format!("{what}, option '{key}'"), &value)?;
        options.insert(key.clone(), value);
    }

    let action = if id.kind.is_builtin() {
        if task.cmd.is_some() {
            return Err(FireshellError::ConfigError(format!(
                "{what}: built-in task does not take `cmd`"
            )));
        }
        if task.paths.is_empty() {
            return Err(FireshellError::ConfigError(format!(
                "{what}: clean task needs at least one entry in `paths`"
            )));
        }
        TaskAction::Clean {
            paths: expand_list(ctx, &what, &task.paths)?,
        }
    } else {
        if !task.paths.is_empty() {
            return Err(FireshellError::ConfigError(format!(
                "{what}: `paths` is only valid for clean tasks"
            )));
        }
        let source = task
            .cmd
            .clone()
            .or_else(|| id.kind.default_command().map(str::to_string))
            .ok_or_else(|| {
                FireshellError::ConfigError(format!("{what}: no command configured"))
            })?;
        TaskAction::Command(resolve_command(
            &what,
            &source,
            ctx,
            &inputs,
            output.as_deref(),
            &options,
        )?)
    };

    let banner = if task.banner {
        if output.is_none() {
            return Err(FireshellError::ConfigError(format!(
                "{what}: `banner = true` needs an `output`"
            )));
        }
        banner.map(str::to_string)
    } else {
        None
    };

    Ok(TaskDefinition {
        id,
        action,
        inputs,
        output,
        options,
        banner,
    })
}

/// Resolve everything in a command template except `{{ inputs }}`, which
/// depends on the files present when the task runs. Every substituted value
/// is shell-quoted.
fn resolve_command(
    what: &str,
    source: &str,
    ctx: &LoadContext<'_>,
    inputs: &[String],
    output: Option<&str>,
    options: &BTreeMap<String, String>,
) -> Result<Template> {
    let rendered = Template::new(source)
        .render(|key| match key {
            "inputs" if !inputs.is_empty() => Some("{{ inputs }}".to_string()),
            "inputs" => None,
            "output" => output.map(shell_quote),
            "flags" => Some(flags(options)),
            _ => match key.strip_prefix("options.") {
                Some(name) => options.get(name).map(|v| shell_quote(v)),
                None => ctx.scalar(key).map(|v| shell_quote(&v)),
            },
        })
        .map_err(|key| match key.as_str() {
            "inputs" => FireshellError::ConfigError(format!(
                "{what}: command uses {{{{ inputs }}}} but the task declares no inputs"
            )),
            "output" => FireshellError::ConfigError(format!(
                "{what}: command uses {{{{ output }}}} but the task declares no output"
            )),
            _ => unknown_placeholder(what, &key),
        })?;
    Ok(Template::new(rendered))
}

fn flags(options: &BTreeMap<String, String>) -> String {
    options
        .iter()
        .map(|(k, v)| shell_quote(&format!("--{k}={v}")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Options are passed through as text; arrays become comma-separated.
fn option_value_string(value: &toml::Value) -> std::result::Result<String, &'static str> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(items) => Ok(items
            .iter()
            .map(option_value_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join(",")),
        toml::Value::Table(_) => Err("a table"),
    }
}

fn resolve_ref(
    raw: &str,
    tasks: &BTreeMap<TaskId, TaskDefinition>,
    owner: &str,
) -> Result<TaskId> {
    let id: TaskId = raw
        .parse()
        .map_err(|e| FireshellError::ConfigError(format!("{owner}: {e}")))?;
    if !tasks.contains_key(&id) {
        return Err(FireshellError::ConfigError(format!(
            "{owner} references unknown task '{id}'"
        )));
    }
    Ok(id)
}

fn resolve_pipelines(
    cfg: &RawConfigFile,
    tasks: &BTreeMap<TaskId, TaskDefinition>,
) -> Result<BTreeMap<String, Pipeline>> {
    let mut pipelines = BTreeMap::new();
    for (name, pipeline) in cfg.pipeline.iter() {
        let owner = format!("pipeline '{name}'");
        if pipeline.tasks.is_empty() {
            return Err(FireshellError::ConfigError(format!(
                "{owner} must list at least one task"
            )));
        }
        let ids = pipeline
            .tasks
            .iter()
            .map(|t| resolve_ref(t, tasks, &owner))
            .collect::<Result<Vec<_>>>()?;
        pipelines.insert(
            name.clone(),
            Pipeline {
                name: name.clone(),
                tasks: ids,
                watch: pipeline.watch,
            },
        );
    }
    Ok(pipelines)
}

fn resolve_bindings(
    cfg: &RawConfigFile,
    ctx: &LoadContext<'_>,
    tasks: &BTreeMap<TaskId, TaskDefinition>,
) -> Result<Vec<WatchBinding>> {
    let mut bindings = Vec::with_capacity(cfg.watch.len());
    for (name, binding) in cfg.watch.iter() {
        let owner = format!("watch binding '{name}'");
        if binding.files.is_empty() {
            return Err(FireshellError::ConfigError(format!(
                "{owner} must list at least one pattern in `files`"
            )));
        }
        if binding.tasks.is_empty() && !binding.reload {
            return Err(FireshellError::ConfigError(format!(
                "{owner} has no tasks and `reload = false`; it would never do anything"
            )));
        }
        let files = expand_list(ctx, &owner, &binding.files)?;
        let ids = binding
            .tasks
            .iter()
            .map(|t| resolve_ref(t, tasks, &owner))
            .collect::<Result<Vec<_>>>()?;
        bindings.push(WatchBinding {
            name: name.clone(),
            files,
            tasks: ids,
            reload: binding.reload,
        });
    }
    Ok(bindings)
}

fn ensure_watch_pipelines_have_bindings(
    pipelines: &BTreeMap<String, Pipeline>,
    bindings: &[WatchBinding],
) -> Result<()> {
    if !bindings.is_empty() {
        return Ok(());
    }
    match pipelines.values().find(|p| p.watch) {
        Some(p) => Err(FireshellError::ConfigError(format!(
            "pipeline '{}' enters watch mode but no [watch.<name>] bindings are declared",
            p.name
        ))),
        None => Ok(()),
    }
}

fn resolve_livereload(cfg: &RawConfigFile, ctx: &LoadContext<'_>) -> Result<Option<Template>> {
    let Some(cmd) = cfg.livereload.cmd.as_deref() else {
        return Ok(None);
    };
    let rendered = Template::new(cmd)
        .render(|key| match key {
            "files" => Some("{{ files }}".to_string()),
            _ => ctx.scalar(key).map(|v| shell_quote(&v)),
        })
        .map_err(|key| unknown_placeholder("[livereload].cmd", &key))?;
    Ok(Some(Template::new(rendered)))
}
