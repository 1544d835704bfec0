// src/watch/watcher.rs

use std::path::PathBuf;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{FireshellError, Result};

/// A single changed path, absolute as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
}

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle stops file watching and closes the
/// event stream.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `root` recursively and stream every changed path.
///
/// - A missing root is a `WatchError`.
/// - Access-only notifications (open/read) are dropped; everything else
///   (create, modify, remove, rename) becomes one [`ChangeEvent`] per path.
/// - The stream is unbounded and ends only when the handle is dropped.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
) -> Result<(WatcherHandle, mpsc::UnboundedReceiver<ChangeEvent>)> {
    let root = root.into();
    if !root.is_dir() {
        return Err(FireshellError::WatchError(format!(
            "watch root {} does not exist or is not a directory",
            root.display()
        )));
    }
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or(root);

    let (tx, rx) = mpsc::unbounded_channel::<ChangeEvent>();

    // Called synchronously by notify on its own thread.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => forward_event(&tx, event),
            Err(err) => warn!(error = %err, "file watch error"),
        },
        Config::default(),
    )
    .map_err(|e| FireshellError::WatchError(format!("creating file watcher: {e}")))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| {
            FireshellError::WatchError(format!("watching {}: {e}", root.display()))
        })?;

    info!("file watcher started on {:?}", root);

    Ok((
        WatcherHandle { _inner: watcher },
        rx,
    ))
}

fn forward_event(tx: &mpsc::UnboundedSender<ChangeEvent>, event: Event) {
    if matches!(event.kind, EventKind::Access(_)) {
        return;
    }
    debug!(?event, "received notify event");

    for path in event.paths {
        if tx.send(ChangeEvent { path }).is_err() {
            // Receiver gone: the watch loop has shut down.
            return;
        }
    }
}
