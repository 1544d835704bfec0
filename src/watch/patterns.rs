// src/watch/patterns.rs

use std::fmt;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::errors::{FireshellError, Result};
use crate::watch::path_utils::trim_current_dir;
use crate::registry::WatchBinding;
use crate::types::TaskId;

/// A watch binding with its file globs compiled.
///
/// Patterns are relative to the project root; the watch loop passes
/// root-relative, forward-slash paths (e.g. `"src/js/main.js"`) into
/// [`CompiledBinding::matches`].
#[derive(Clone)]
pub struct CompiledBinding {
    name: String,
    tasks: Vec<TaskId>,
    reload: bool,
    watch_set: GlobSet,
}

impl fmt::Debug for CompiledBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledBinding")
            .field("name", &self.name)
            .field("tasks", &self.tasks)
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

impl CompiledBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tasks re-run when a matching file changes, in declared order.
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Whether a successful re-run signals a browser reload.
    pub fn reload(&self) -> bool {
        self.reload
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.watch_set.is_match(rel_path)
    }
}

/// Compile every binding's globs. An invalid glob is a `WatchError`.
///
/// Bindings keep the order they come in (name order from the config).
pub fn compile_bindings(bindings: &[WatchBinding]) -> Result<Vec<CompiledBinding>> {
    bindings
        .iter()
        .map(|b| {
            let watch_set = build_globset(&b.files).map_err(|e| {
                FireshellError::WatchError(format!("watch binding '{}': {e}", b.name))
            })?;
            Ok(CompiledBinding {
                name: b.name.clone(),
                tasks: b.tasks.clone(),
                reload: b.reload,
                watch_set,
            })
        })
        .collect()
}

/// Bindings interested in `rel_path`, in binding order.
pub fn matching_bindings<'a>(
    bindings: &'a [CompiledBinding],
    rel_path: &'a str,
) -> impl Iterator<Item = &'a CompiledBinding> + 'a {
    bindings.iter().filter(move |b| b.matches(rel_path))
}

/// Build a GlobSet where `*` stays within one path segment.
fn build_globset(patterns: &[String]) -> std::result::Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let pat = trim_current_dir(pat);
        builder.add(GlobBuilder::new(pat).literal_separator(true).build()?);
    }
    builder.build()
}
