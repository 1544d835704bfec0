// src/registry/mod.rs

//! Task registry: the immutable tables the dispatcher reads from.
//!
//! - [`definitions`] holds the task, pipeline and watch-binding descriptors.
//! - [`task_registry`] provides lookups by [`crate::types::TaskId`] and
//!   pipeline name.

pub mod definitions;
pub mod task_registry;

pub use definitions::{Pipeline, TaskAction, TaskDefinition, WatchBinding};
pub use task_registry::TaskRegistry;
