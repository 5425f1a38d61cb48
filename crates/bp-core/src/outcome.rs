//! Execution outcomes supplied by the host's result registry.

use crate::types::TaskId;

/// What the host's execution-result registry knows about a finished task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskOutcome {
    /// Human-readable label of the execution strategy the task ran with.
    pub strategy: String,

    /// Diagnostic lines produced while executing the task, in order.
    pub diagnostics: Vec<String>,
}

/// Read-only access to the host's execution-result registry.
///
/// The registry is keyed by task identity; having no outcome for a task is
/// normal and simply produces a shorter log block.
pub trait OutcomeSource: Send + Sync {
    /// Returns the recorded outcome for `task`, if any.
    fn outcome(&self, task: &TaskId) -> Option<TaskOutcome>;
}

/// A registry that knows nothing; useful when the host has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOutcomes;

impl OutcomeSource for NoOutcomes {
    fn outcome(&self, _task: &TaskId) -> Option<TaskOutcome> {
        None
    }
}
