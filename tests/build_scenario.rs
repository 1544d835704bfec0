// tests/build_scenario.rs
#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use fireshell::cli::CliArgs;
use fireshell::config::load_and_validate;
use fireshell::engine::Dispatcher;
use fireshell::errors::FireshellError;
use fireshell::exec::RealExecutorBackend;
use fireshell::fs::RealFileSystem;
use fireshell::registry::TaskRegistry;
use fireshell_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// The deploy build with shell stand-ins for the real tools.
const BUILD_CONFIG: &str = r#"
[project]
css = ["{{ project.src }}/scss/styles.scss"]
js = ["{{ project.src }}/js/*.js"]

[package]
name = "demo"
version = "0.1.0"

[banner]
template = "/*! {{ pkg.name }} v{{ pkg.version }} */\n"

[task."sass:dist"]
cmd = "cp {{ inputs }} {{ output }}"
inputs = ["{{ project.css }}"]
output = "{{ project.dist }}/css/styles.unprefixed.css"

[task."autoprefixer:dist"]
cmd = "cp {{ inputs }} {{ output }}"
inputs = ["{{ project.dist }}/css/styles.unprefixed.css"]
output = "{{ project.dist }}/css/styles.prefixed.css"

[task."cssmin:dist"]
cmd = "cat {{ inputs }} > {{ output }}"
inputs = ["{{ project.dist }}/css/styles.prefixed.css"]
output = "{{ project.dist }}/css/styles.min.css"
banner = true

[task."clean:dist"]
paths = [
  "{{ project.dist }}/css/styles.unprefixed.css",
  "{{ project.dist }}/css/styles.prefixed.css",
]

[task.jshint]
cmd = "test \"$FIRESHELL_OPTION_CONFIG\" = .jshintrc && test \"$FIRESHELL_TASK\" = jshint"
inputs = ["{{ project.js }}"]
options = { config = ".jshintrc" }

[task."uglify:dist"]
cmd = "cat {{ inputs }} > {{ output }}"
inputs = ["{{ project.js }}"]
output = "{{ project.dist }}/js/scripts.min.js"
banner = true

[task."concat:dist"]
cmd = "exit 7"

[pipeline.build]
tasks = ["sass:dist", "autoprefixer:dist", "cssmin:dist", "clean:dist", "jshint", "uglify:dist"]

[pipeline.broken]
tasks = ["sass:dist", "concat:dist", "uglify:dist"]
"#;

fn project(dir: &Path) -> TestResult {
    fs::create_dir_all(dir.join("src/scss"))?;
    fs::create_dir_all(dir.join("src/js"))?;
    fs::write(dir.join("Fireshell.toml"), BUILD_CONFIG)?;
    fs::write(dir.join("src/scss/styles.scss"), "body{color:red}\n")?;
    fs::write(dir.join("src/js/a.js"), "var a=1;\n")?;
    fs::write(dir.join("src/js/b.js"), "var b=2;\n")?;
    Ok(())
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn build_produces_one_minified_stylesheet_and_one_script() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    project(dir.path())?;

    let args = CliArgs {
        pipeline: "build".to_string(),
        config: dir.path().join("Fireshell.toml").to_string_lossy().into_owned(),
        tasks: vec![],
        no_watch: true,
        dry_run: false,
        log_level: None,
    };
    with_timeout(fireshell::run(args)).await?;

    let dist = dir.path().join("dist");
    assert_eq!(file_names(&dist.join("css")), vec!["styles.min.css"]);
    assert_eq!(file_names(&dist.join("js")), vec!["scripts.min.js"]);

    let css = fs::read_to_string(dist.join("css/styles.min.css"))?;
    assert_eq!(css, "/*! demo v0.1.0 */\nbody{color:red}\n");

    let js = fs::read_to_string(dist.join("js/scripts.min.js"))?;
    assert_eq!(js, "/*! demo v0.1.0 */\nvar a=1;\nvar b=2;\n");
    Ok(())
}

#[tokio::test]
async fn failing_tool_stops_the_build_with_its_exit_code() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    project(dir.path())?;

    let cfg = load_and_validate(dir.path().join("Fireshell.toml"))?;
    let registry = Arc::new(TaskRegistry::from_config(&cfg, dir.path()));
    let executor = RealExecutorBackend::new(dir.path(), Arc::new(RealFileSystem));
    let mut dispatcher = Dispatcher::new(registry, executor);

    let err = with_timeout(dispatcher.run_pipeline("broken")).await.unwrap_err();

    assert!(matches!(
        err,
        FireshellError::ExternalToolError { ref task, code: 7 } if task == "concat:dist"
    ));
    assert_eq!(err.exit_code(), 7);
    // The first task ran, the one after the failure did not.
    assert!(dir.path().join("dist/css/styles.unprefixed.css").is_file());
    assert!(!dir.path().join("dist/js").exists());
    Ok(())
}

#[tokio::test]
async fn dry_run_executes_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    project(dir.path())?;

    let args = CliArgs {
        pipeline: "build".to_string(),
        config: dir.path().join("Fireshell.toml").to_string_lossy().into_owned(),
        tasks: vec![],
        no_watch: false,
        dry_run: true,
        log_level: None,
    };
    with_timeout(fireshell::run(args)).await?;

    assert!(!dir.path().join("dist").exists());
    Ok(())
}

#[tokio::test]
async fn task_flag_runs_only_the_named_tasks() -> TestResult {
    let dir = tempfile::tempdir()?;
    project(dir.path())?;

    let args = CliArgs {
        pipeline: "default".to_string(),
        config: dir.path().join("Fireshell.toml").to_string_lossy().into_owned(),
        tasks: vec!["uglify:dist".to_string()],
        no_watch: false,
        dry_run: false,
        log_level: None,
    };
    with_timeout(fireshell::run(args)).await?;

    assert!(dir.path().join("dist/js/scripts.min.js").is_file());
    assert!(!dir.path().join("dist/css").exists());
    Ok(())
}
