// src/engine/watch_loop.rs

use std::path::Path;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::dispatcher::Dispatcher;
use crate::errors::Result;
use crate::exec::ExecutorBackend;
use crate::watch::path_utils::relative_str;
use crate::watch::{matching_bindings, ChangeEvent, CompiledBinding, Reloader};

/// What happened to one binding for one change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingRun {
    Completed { binding: String, reloaded: bool },
    Failed { binding: String, error: String },
}

/// Result of handling a single change event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Root-relative path, `None` if the path lies outside the root.
    pub path: Option<String>,
    pub runs: Vec<BindingRun>,
}

impl ChangeSummary {
    /// True if no binding matched.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Consumes the change event stream one event at a time.
///
/// For each event every matching binding (in binding order) re-runs its
/// tasks through the dispatcher and, when it succeeded and asks for it,
/// signals a reload. A failing binding is logged and skipped; the loop keeps
/// going. Events are never coalesced or debounced.
pub struct WatchLoop<E> {
    dispatcher: Dispatcher<E>,
    bindings: Vec<CompiledBinding>,
    reloader: Box<dyn Reloader>,
}

impl<E: ExecutorBackend> WatchLoop<E> {
    pub fn new(
        dispatcher: Dispatcher<E>,
        bindings: Vec<CompiledBinding>,
        reloader: Box<dyn Reloader>,
    ) -> Self {
        Self {
            dispatcher,
            bindings,
            reloader,
        }
    }

    /// React to a change of `path` (absolute, or relative to the root).
    pub async fn handle_change(&mut self, path: &Path) -> ChangeSummary {
        let root = self.dispatcher.registry().root().to_path_buf();
        let rel = if path.is_relative() {
            Some(path.to_string_lossy().replace('\\', "/"))
        } else {
            relative_str(&root, path)
        };

        let Some(rel) = rel else {
            debug!(?path, "change outside watch root ignored");
            return ChangeSummary::default();
        };

        let matched: Vec<CompiledBinding> =
            matching_bindings(&self.bindings, &rel).cloned().collect();
        if matched.is_empty() {
            debug!(path = %rel, "no watch binding matches");
        }

        let mut runs = Vec::with_capacity(matched.len());
        for binding in matched {
            info!(path = %rel, binding = %binding.name(), "change detected");

            let label = format!("watch:{}", binding.name());
            let run = match self.dispatcher.run_tasks(&label, binding.tasks()).await {
                Ok(_) => {
                    if binding.reload() {
                        self.reloader.reload(std::slice::from_ref(&rel)).await;
                    }
                    BindingRun::Completed {
                        binding: binding.name().to_string(),
                        reloaded: binding.reload(),
                    }
                }
                Err(err) => {
                    warn!(
                        binding = %binding.name(),
                        error = %err,
                        "watch binding failed; waiting for the next change"
                    );
                    BindingRun::Failed {
                        binding: binding.name().to_string(),
                        error: err.to_string(),
                    }
                }
            };
            runs.push(run);
        }

        ChangeSummary {
            path: Some(rel),
            runs,
        }
    }

    /// Process events until the stream closes.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ChangeEvent>) -> Result<()> {
        info!(bindings = self.bindings.len(), "watching for changes");
        while let Some(event) = events.recv().await {
            self.handle_change(&event.path).await;
        }
        debug!("change event stream closed");
        Ok(())
    }
}
