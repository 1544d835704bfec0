// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod registry;
pub mod template;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::ConfigFile;
use crate::engine::{Dispatcher, WatchLoop};
use crate::errors::Result;
use crate::exec::RealExecutorBackend;
use crate::fs::RealFileSystem;
use crate::registry::{TaskAction, TaskRegistry};
use crate::types::TaskId;
use crate::watch::{compile_bindings, spawn_watcher, CommandReloader, LogReloader, Reloader};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - the task registry and dispatcher
/// - the real executor
/// - (optional) file watcher and watch loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let root = config_root_dir(&config_path);
    let registry = Arc::new(TaskRegistry::from_config(&cfg, root));

    // `--task` overrides the pipeline and never watches.
    let ad_hoc = if args.tasks.is_empty() {
        None
    } else {
        Some(registry.parse_task_ids(&args.tasks)?)
    };
    let watch = match &ad_hoc {
        Some(_) => false,
        None => registry.pipeline(&args.pipeline)?.watch && !args.no_watch,
    };

    if args.dry_run {
        let ids = match &ad_hoc {
            Some(ids) => ids.clone(),
            None => registry.pipeline(&args.pipeline)?.tasks.clone(),
        };
        print_dry_run(&cfg, &registry, &ids, watch);
        return Ok(());
    }

    // Compile globs up front so a bad binding fails before any tool runs.
    let bindings = if watch {
        Some(compile_bindings(registry.bindings())?)
    } else {
        None
    };

    let executor = RealExecutorBackend::new(registry.root(), Arc::new(RealFileSystem));
    let mut dispatcher = Dispatcher::new(Arc::clone(&registry), executor);

    let report = match &ad_hoc {
        Some(ids) => dispatcher.run_tasks("tasks", ids).await?,
        None => dispatcher.run_pipeline(&args.pipeline).await?,
    };
    report.print();

    let Some(bindings) = bindings else {
        return Ok(());
    };

    let (_watcher_handle, events) = spawn_watcher(registry.root())?;

    let reloader: Box<dyn Reloader> = match &cfg.livereload {
        Some(template) => Box::new(CommandReloader::new(template.clone(), registry.root())),
        None => Box::new(LogReloader),
    };

    let watch_loop = WatchLoop::new(dispatcher, bindings, reloader);

    // Ctrl-C → graceful shutdown with exit status 0.
    tokio::select! {
        res = watch_loop.run(events) => res?,
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("interrupted; stopping watch loop");
        }
    }

    Ok(())
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "site/Fireshell.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Fireshell.toml" (parent = ""),
///   we fall back to the current working directory.
///
/// The result is canonicalized when possible so watcher event paths can be
/// made relative to it.
fn config_root_dir(config_path: &Path) -> PathBuf {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    dir.canonicalize().unwrap_or(dir)
}

/// Dry-run output: the tasks that would run, in order, and the bindings.
fn print_dry_run(cfg: &ConfigFile, registry: &TaskRegistry, ids: &[TaskId], watch: bool) {
    println!("fireshell dry-run");
    println!("  root = {}", registry.root().display());
    println!("  project.src = {}", cfg.project.src);
    println!("  project.dist = {}", cfg.project.dist);
    println!();

    println!("tasks ({}):", ids.len());
    for task in ids.iter().filter_map(|id| registry.task(id)) {
        println!("  - {}", task.id);
        match &task.action {
            TaskAction::Command(template) => println!("      cmd: {}", template.source()),
            TaskAction::Clean { paths } => println!("      clean: {:?}", paths),
        }
        if !task.inputs.is_empty() {
            println!("      inputs: {:?}", task.inputs);
        }
        if let Some(ref output) = task.output {
            println!("      output: {output}");
        }
        if !task.options.is_empty() {
            println!("      options: {:?}", task.options);
        }
        if task.banner.is_some() {
            println!("      banner: true");
        }
    }

    if watch {
        println!();
        println!("watch ({}):", registry.bindings().len());
        for binding in registry.bindings() {
            let tasks: Vec<String> = binding.tasks.iter().map(TaskId::to_string).collect();
            println!("  - {}", binding.name);
            println!("      files: {:?}", binding.files);
            println!("      tasks: {:?}", tasks);
            if binding.reload {
                println!("      reload: true");
            }
        }
    }

    debug!("dry-run complete (no execution)");
}
