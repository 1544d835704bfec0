// src/engine/report.rs

//! Per-task timing summary for a finished pipeline run.

use std::fmt;
use std::time::Duration;

use crate::types::TaskId;

/// Elapsed time of every task in a successful run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    label: String,
    entries: Vec<(TaskId, Duration)>,
}

impl PipelineReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, id: TaskId, elapsed: Duration) {
        self.entries.push((id, elapsed));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[(TaskId, Duration)] {
        &self.entries
    }

    /// Task ids in the order they ran.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn total(&self) -> Duration {
        self.entries.iter().map(|(_, d)| *d).sum()
    }

    /// Print the summary to stdout alongside tool output.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        writeln!(f, "Execution Time ({})", self.label)?;

        let width = self
            .entries
            .iter()
            .map(|(id, _)| id.to_string().len())
            .max()
            .unwrap_or(0);

        for (id, elapsed) in &self.entries {
            let share = if total.is_zero() {
                0
            } else {
                (elapsed.as_secs_f64() / total.as_secs_f64() * 100.0).round() as u32
            };
            writeln!(
                f,
                "  {:<width$}  {:>8}  {:>3}%",
                id.to_string(),
                format_duration(*elapsed),
                share,
            )?;
        }

        writeln!(f, "Total {}", format_duration(total))
    }
}

fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
