// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling each watch binding's `files` globs.
//! - Wiring up a cross-platform filesystem watcher (`notify`) that streams
//!   [`ChangeEvent`]s over an unbounded channel.
//! - Signalling browser reloads after a binding re-runs.
//!
//! It does **not** run tasks; the engine's watch loop consumes the stream
//! and dispatches.

pub mod path_utils;
pub mod patterns;
pub mod reload;
pub mod watcher;

pub use patterns::{compile_bindings, matching_bindings, CompiledBinding};
pub use reload::{CommandReloader, LogReloader, Reloader};
pub use watcher::{spawn_watcher, ChangeEvent, WatcherHandle};
