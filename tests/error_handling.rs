// tests/error_handling.rs

use std::io::Write;

use tempfile::NamedTempFile;

use fireshell::config::load_and_validate;
use fireshell::errors::FireshellError;

fn load(toml_src: &str) -> Result<fireshell::config::ConfigFile, FireshellError> {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{toml_src}").unwrap();
    load_and_validate(file.path())
}

#[test]
fn unknown_pipeline_task_returns_config_error() {
    let result = load(
        r#"
[task."sass:dist"]
inputs = ["src/scss/styles.scss"]
output = "dist/css/styles.css"

[pipeline.build]
tasks = ["sass:dist", "cssmin:dist"]
"#,
    );

    match result {
        Err(FireshellError::ConfigError(msg)) => {
            assert!(msg.contains("pipeline 'build'"));
            assert!(msg.contains("cssmin:dist"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_profile_returns_config_error() {
    let result = load(
        r#"
[task."sass:prod"]
inputs = ["src/scss/styles.scss"]
output = "dist/css/styles.css"
"#,
    );

    match result {
        Err(FireshellError::ConfigError(msg)) => assert!(msg.contains("sass:prod")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_placeholder_returns_config_error() {
    let result = load(
        r#"
[task."uglify:dist"]
inputs = ["{{ project.js }}"]
output = "{{ project.assets }}/js/scripts.min.js"
"#,
    );

    match result {
        Err(FireshellError::ConfigError(msg)) => assert!(msg.contains("project.assets")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn banner_with_missing_metadata_returns_config_error() {
    let result = load(
        r#"
[package]
name = "fireshell"

[task."uglify:dist"]
inputs = ["src/js/*.js"]
output = "dist/js/scripts.min.js"
banner = true
"#,
    );

    match result {
        Err(FireshellError::ConfigError(msg)) => assert!(msg.contains("pkg.title")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_config_returns_config_error() {
    assert!(matches!(load(""), Err(FireshellError::ConfigError(_))));
}

#[test]
fn malformed_toml_returns_toml_error() {
    assert!(matches!(
        load("[task.\"sass:dist\"\ninputs = "),
        Err(FireshellError::TomlError(_))
    ));
}

#[test]
fn missing_config_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("Fireshell.toml"));
    assert!(matches!(result, Err(FireshellError::IoError(_))));
}
