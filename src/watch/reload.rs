// src/watch/reload.rs

//! Browser reload signalling after a watch binding re-runs.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::{info, warn};

use crate::engine::TaskOutcome;
use crate::exec::run_command;
use crate::exec::shell::shell_quote;
use crate::template::Template;

/// Something that can tell a browser to reload.
///
/// Reload failures are never fatal; implementations log and carry on.
pub trait Reloader: Send {
    fn reload<'a>(&'a mut self, files: &'a [String]) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Default reloader: only logs that a reload would happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReloader;

impl Reloader for LogReloader {
    fn reload<'a>(&'a mut self, files: &'a [String]) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            info!(files = ?files, "reload");
        })
    }
}

/// Runs `[livereload] cmd` through the shell, with `{{ files }}` set to the
/// comma-separated changed paths.
#[derive(Debug, Clone)]
pub struct CommandReloader {
    template: Template,
    root: PathBuf,
}

impl CommandReloader {
    pub fn new(template: Template, root: impl Into<PathBuf>) -> Self {
        Self {
            template,
            root: root.into(),
        }
    }

    fn render(&self, files: &[String]) -> Option<String> {
        let joined = shell_quote(&files.join(","));
        self.template
            .render(|key| (key == "files").then(|| joined.clone()))
            .map_err(|key| warn!(placeholder = %key, "livereload command has an unknown placeholder"))
            .ok()
    }
}

impl Reloader for CommandReloader {
    fn reload<'a>(&'a mut self, files: &'a [String]) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let Some(cmd) = self.render(files) else {
                return;
            };
            match run_command("livereload", &cmd, &self.root, &[]).await {
                Ok(TaskOutcome::Success) => info!(files = ?files, "reload signalled"),
                Ok(TaskOutcome::Failed(code)) => {
                    warn!(exit_code = code, "livereload command failed")
                }
                Err(err) => warn!(error = %err, "livereload command could not run"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_comma_joined() {
        let r = CommandReloader::new(
            Template::new("curl -s http://localhost:35729/changed?files={{ files }}"),
            ".",
        );
        let cmd = r
            .render(&["src/js/main.js".to_string(), "src/js/Point.js".to_string()])
            .unwrap();
        assert_eq!(
            cmd,
            "curl -s http://localhost:35729/changed?files=src/js/main.js,src/js/Point.js"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_the_reload_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = CommandReloader::new(Template::new("printf '%s' {{ files }} > reloaded.txt"), dir.path());

        r.reload(&["src/scss/styles.scss".to_string()]).await;

        let written = std::fs::read_to_string(dir.path().join("reloaded.txt")).unwrap();
        assert_eq!(written, "src/scss/styles.scss");
    }
}
