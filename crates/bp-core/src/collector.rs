//! The event-handling boundary between the host engine and the aggregates.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::classify::TaskClassifier;
use crate::events::TaskObserver;
use crate::log::EventLog;
use crate::outcome::OutcomeSource;
use crate::timing::{TimingStore, TimingSummary};
use crate::types::TaskInfo;

/// Mutable per-run state.
///
/// The timing store and the event log live behind one lock: a finish must
/// update the running total, the per-task durations, and the log atomically
/// relative to other events, or concurrent finishes could interleave between
/// the structures.
#[derive(Debug, Default)]
struct RunState {
    timing: TimingStore,
    log: EventLog,
}

/// Everything the terminal reporting step needs, captured in one call.
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    /// Aggregated timings at snapshot time.
    pub timing: TimingSummary,

    /// The joined event-log text, in finish order.
    pub event_log: String,
}

/// Collects task timings and result lines for one build run.
///
/// The collector implements [`TaskObserver`]; the host registers it for task
/// lifecycle callbacks and may invoke it from any number of worker threads.
/// Classification and outcome lookups run outside the critical section, so
/// the lock is held only for O(1) map and buffer mutations and never delays
/// a measured task noticeably.
pub struct TaskCollector {
    classifier: Box<dyn TaskClassifier>,
    outcomes: Box<dyn OutcomeSource>,
    state: Mutex<RunState>,
}

impl TaskCollector {
    /// Creates a collector with the given classification policy and
    /// execution-result registry.
    pub fn new(
        classifier: impl TaskClassifier + 'static,
        outcomes: impl OutcomeSource + 'static,
    ) -> Self {
        Self {
            classifier: Box::new(classifier),
            outcomes: Box::new(outcomes),
            state: Mutex::new(RunState::default()),
        }
    }

    /// Takes a read-only snapshot of the aggregates and the log.
    ///
    /// Intended for the terminal reporting step, after the host guarantees
    /// no further task callbacks will arrive.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        let state = self.lock_state();
        RunSnapshot {
            timing: state.timing.summary(),
            event_log: state.log.render(),
        }
    }

    /// Locks the run state, recovering from poisoning.
    ///
    /// A panic in some other callback must not silence instrumentation for
    /// the rest of the run, and instrumentation failures must never
    /// propagate into the host build.
    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskObserver for TaskCollector {
    fn task_started(&self, task: &TaskInfo) {
        let now = Instant::now();
        self.lock_state().timing.start(task.id.clone(), now);
    }

    fn task_finished(&self, task: &TaskInfo, skip_reason: Option<&str>) {
        let now = Instant::now();
        let instrumented = self.classifier.is_instrumented(task);

        // Only executed instrumented tasks get a registry lookup, and the
        // registry is consulted before taking the lock.
        let outcome = if instrumented && skip_reason.is_none() {
            self.outcomes.outcome(&task.id)
        } else {
            None
        };

        let mut state = self.lock_state();
        let Some(took) = state.timing.finish(&task.id, instrumented, now) else {
            // No matching start: nothing was accounted, so nothing is logged.
            return;
        };

        if instrumented {
            match skip_reason {
                Some(reason) => state.log.record_skipped(&task.id, reason),
                None => state.log.record_executed(&task.id, took, outcome.as_ref()),
            }
        }
    }
}
