//! Append-only log of per-task results.
//!
//! Each instrumented task's finish appends one immutable text block; the
//! blocks are joined exactly once at render time. Entries keep the global
//! order in which finish events were observed.

use std::fmt::Write as _;
use std::time::Duration;

use crate::outcome::TaskOutcome;
use crate::timing::format_secs;
use crate::types::TaskId;

/// Ordered, append-only buffer of per-task result blocks.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<String>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line noting that `task` was skipped and why.
    pub fn record_skipped(&mut self, task: &TaskId, reason: &str) {
        self.entries.push(format!("Skipped {task}: {reason}"));
    }

    /// Appends a block for an executed task: id and duration, the execution
    /// strategy when one is known, and any diagnostic lines indented below.
    pub fn record_executed(&mut self, task: &TaskId, took: Duration, outcome: Option<&TaskOutcome>) {
        let mut block = format!("Executed {task} in {}", format_secs(took));
        if let Some(outcome) = outcome {
            if !outcome.strategy.is_empty() {
                write!(block, " ({})", outcome.strategy).unwrap();
            }
            for line in &outcome.diagnostics {
                write!(block, "\n  {line}").unwrap();
            }
        }
        self.entries.push(block);
    }

    /// Number of recorded blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins all blocks into one text, in append order.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TaskId {
        TaskId::new(s).expect("valid test id")
    }

    #[test]
    fn skipped_entry_names_task_and_reason() {
        let mut log = EventLog::new();
        log.record_skipped(&id(":app:compileMain"), "UP-TO-DATE");
        assert_eq!(log.render(), "Skipped :app:compileMain: UP-TO-DATE");
    }

    #[test]
    fn executed_entry_without_outcome_is_one_line() {
        let mut log = EventLog::new();
        log.record_executed(&id(":app:compileMain"), Duration::from_secs(3), None);
        assert_eq!(log.render(), "Executed :app:compileMain in 3.00 s");
    }

    #[test]
    fn executed_entry_appends_strategy_and_diagnostics() {
        let mut log = EventLog::new();
        let outcome = TaskOutcome {
            strategy: "incremental".to_string(),
            diagnostics: vec!["warning: unused input".to_string(), "note: cached".to_string()],
        };
        log.record_executed(&id(":app:compileMain"), Duration::from_millis(1500), Some(&outcome));

        let expected = concat!(
            "Executed :app:compileMain in 1.50 s (incremental)\n",
            "  warning: unused input\n",
            "  note: cached"
        );
        assert_eq!(log.render(), expected);
    }

    #[test]
    fn empty_strategy_is_omitted() {
        let mut log = EventLog::new();
        let outcome = TaskOutcome {
            strategy: String::new(),
            diagnostics: vec!["note: cached".to_string()],
        };
        log.record_executed(&id(":a:b"), Duration::from_secs(1), Some(&outcome));
        assert_eq!(log.render(), "Executed :a:b in 1.00 s\n  note: cached");
    }

    #[test]
    fn entries_keep_append_order() {
        let mut log = EventLog::new();
        log.record_executed(&id(":b:second"), Duration::from_secs(1), None);
        log.record_skipped(&id(":a:first"), "NO-SOURCE");
        log.record_executed(&id(":c:third"), Duration::from_secs(2), None);

        let text = log.render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Executed :b:second in 1.00 s",
                "Skipped :a:first: NO-SOURCE",
                "Executed :c:third in 2.00 s",
            ]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn empty_log_renders_empty_text() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.render(), "");
    }
}
