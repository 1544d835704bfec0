// src/exec/mod.rs

//! Task execution layer.
//!
//! This module is responsible for actually running the tasks the dispatcher
//! hands it, using `tokio::process::Command` for external tools and the
//! [`crate::fs::FileSystem`] abstraction for built-in steps.
//!
//! - [`backend`] provides the `ExecutorBackend` trait and the
//!   `RealExecutorBackend` used in production, which tests replace with a
//!   fake implementation.
//! - [`task_runner`] spawns a single tool process and forwards its output.
//! - [`inputs`] expands input globs at dispatch time.
//! - [`clean`] is the built-in deletion step.
//! - [`banner`] prepends rendered banners to finished outputs.
//! - [`shell`] builds shell commands and quotes arguments.

pub mod backend;
pub mod banner;
pub mod clean;
pub mod inputs;
pub mod shell;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use task_runner::run_command;
