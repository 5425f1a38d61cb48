//! Wall-clock accounting for task execution.
//!
//! [`TimingStore`] pairs start and finish timestamps per task and keeps two
//! aggregates: the total time across *every* task, and per-task durations for
//! the instrumented subset only. The store holds plain data and takes
//! timestamps as arguments; callers capture `Instant::now()` themselves, which
//! keeps the accounting testable with fabricated instants.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::TaskId;

/// A completed, instrumented task and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDuration {
    /// The task's identity.
    pub task: TaskId,
    /// Measured wall-clock duration, finish minus start.
    pub took: Duration,
}

/// Read-only snapshot of a [`TimingStore`] taken at report time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimingSummary {
    /// Total time across all tasks, instrumented or not.
    pub total_all_tasks: Duration,

    /// Durations of instrumented tasks, in completion order.
    pub per_task: Vec<TaskDuration>,
}

impl TimingSummary {
    /// Sum of the instrumented per-task durations.
    ///
    /// Always `<= total_all_tasks`, because the total also covers tasks that
    /// were never classified as instrumented.
    #[must_use]
    pub fn instrumented_total(&self) -> Duration {
        self.per_task.iter().map(|entry| entry.took).sum()
    }
}

/// Tracks pending starts and completed durations for one build run.
///
/// A task id appears in the per-task durations at most once: if the host
/// re-executes an id within a run, the later completion overwrites the
/// earlier duration (the first measurement is lost, as documented). A finish
/// without a matching start is dropped without any accounting.
#[derive(Debug, Default)]
pub struct TimingStore {
    /// Start timestamps of tasks that have not finished yet.
    pending: HashMap<TaskId, Instant>,

    /// Completed instrumented tasks, in completion order.
    completed: Vec<TaskDuration>,

    /// Position of each completed task id in `completed`.
    positions: HashMap<TaskId, usize>,

    /// Running total across every finished task.
    total_all_tasks: Duration,
}

impl TimingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `task` started at `at`.
    ///
    /// A second start for a task that is still pending overwrites the earlier
    /// timestamp; the host guarantees start/finish pairing, so this is a
    /// defensive no-op rather than an error.
    pub fn start(&mut self, task: TaskId, at: Instant) {
        self.pending.insert(task, at);
    }

    /// Records that `task` finished at `at` and returns its duration.
    ///
    /// Returns `None` when no start is pending for `task` (e.g. the listener
    /// attached mid-run); nothing is accounted in that case and the caller
    /// should produce no log entry. Otherwise the duration is added to the
    /// all-tasks total unconditionally and, when `instrumented`, recorded
    /// under the task's id as well.
    pub fn finish(&mut self, task: &TaskId, instrumented: bool, at: Instant) -> Option<Duration> {
        let started = self.pending.remove(task)?;
        let took = at.saturating_duration_since(started);
        self.total_all_tasks += took;

        if instrumented {
            if let Some(&position) = self.positions.get(task) {
                self.completed[position].took = took;
            } else {
                self.positions.insert(task.clone(), self.completed.len());
                self.completed.push(TaskDuration {
                    task: task.clone(),
                    took,
                });
            }
        }

        Some(took)
    }

    /// Takes a read-only snapshot of the aggregates.
    #[must_use]
    pub fn summary(&self) -> TimingSummary {
        TimingSummary {
            total_all_tasks: self.total_all_tasks,
            per_task: self.completed.clone(),
        }
    }
}

/// Formats a duration as seconds with two decimal places, e.g. `3.00 s`.
#[must_use]
pub fn format_secs(duration: Duration) -> String {
    format!("{:.2} s", duration.as_secs_f64())
}
