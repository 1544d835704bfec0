// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `fireshell`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fireshell",
    version,
    about = "Run front-end build pipelines and re-run tasks when files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Pipeline to run.
    ///
    /// `default` builds for development and, if the pipeline sets
    /// `watch = true`, keeps watching. `build` is the usual deploy build.
    #[arg(value_name = "PIPELINE", default_value = "default")]
    pub pipeline: String,

    /// Path to the config file (TOML).
    ///
    /// The directory containing it is the project root.
    #[arg(long, value_name = "PATH", default_value = "Fireshell.toml")]
    pub config: String,

    /// Run these tasks (e.g. `sass:dist`) in the given order instead of a
    /// pipeline. Never enters the watch loop.
    #[arg(long = "task", value_name = "ID")]
    pub tasks: Vec<String>,

    /// Run the pipeline once and exit even if it has `watch = true`.
    #[arg(long)]
    pub no_watch: bool,

    /// Parse + validate, print the plan, but don't run any tool.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FIRESHELL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_default_pipeline() {
        let args = CliArgs::try_parse_from(["fireshell"]).unwrap();
        assert_eq!(args.pipeline, "default");
        assert_eq!(args.config, "Fireshell.toml");
        assert!(args.tasks.is_empty());
        assert!(!args.no_watch);
    }

    #[test]
    fn parses_pipeline_and_repeated_tasks() {
        let args = CliArgs::try_parse_from([
            "fireshell",
            "build",
            "--task",
            "sass:dist",
            "--task",
            "cssmin:dist",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.pipeline, "build");
        assert_eq!(args.tasks, vec!["sass:dist", "cssmin:dist"]);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }
}
