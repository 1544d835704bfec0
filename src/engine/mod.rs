// src/engine/mod.rs

//! Orchestration engine for fireshell.
//!
//! This module ties together:
//! - the [`dispatcher`], which runs a pipeline (or an ad-hoc task list)
//!   strictly in declared order through an `ExecutorBackend`
//! - the [`report`] of per-task timings printed after a run
//! - the [`watch_loop`], which consumes file change events one at a time
//!   and re-runs the matching watch bindings
//!
//! Nothing here spawns processes directly; that is the job of
//! [`crate::exec`].

/// Outcome of a single task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// Non-zero exit. `-1` when the process gave no exit code (signal, or
    /// it never started).
    Failed(i32),
}

pub mod dispatcher;
pub mod report;
pub mod watch_loop;

pub use dispatcher::Dispatcher;
pub use report::PipelineReport;
pub use watch_loop::{BindingRun, ChangeSummary, WatchLoop};
