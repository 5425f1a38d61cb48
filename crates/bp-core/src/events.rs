//! Observer capabilities driven by the host engine.
//!
//! The host exposes two independent registration points: one for per-task
//! lifecycle callbacks and one for the single end-of-run callback. They are
//! deliberately separate traits so an embedder can register each with the
//! host on its own, and compose them however the host's listener API wants.

use crate::types::TaskInfo;

/// Receives per-task lifecycle events.
///
/// The host may call these from multiple worker threads concurrently while
/// tasks execute in parallel.
pub trait TaskObserver: Send + Sync {
    /// A task began executing.
    fn task_started(&self, task: &TaskInfo);

    /// A task finished. `skip_reason` is set when the host skipped the task
    /// instead of executing it (e.g. up-to-date checks).
    fn task_finished(&self, task: &TaskInfo, skip_reason: Option<&str>);
}

/// Receives the terminal build event.
///
/// The host calls [`build_finished`](Self::build_finished) exactly once,
/// after it guarantees no further task callbacks will arrive. If the host
/// terminates abnormally the call never happens and no report is produced.
pub trait BuildObserver: Send + Sync {
    /// The build run completed; produce whatever end-of-run output applies.
    fn build_finished(&self);
}
