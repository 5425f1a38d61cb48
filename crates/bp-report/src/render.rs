//! Pure rendering of the end-of-run report.
//!
//! [`render_report`] is a pure function of a timing snapshot, the event-log
//! text, and the unit listing: rendering the same data twice yields
//! byte-identical output. Section order is the output contract: overview,
//! per-task table, event log, units of compilation.

use std::cmp::Reverse;
use std::fmt::Write as _;
use std::time::Duration;

use bp_core::timing::{TaskDuration, TimingSummary, format_secs};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::table::TextTable;
use crate::unit::CompilationUnit;

/// Which rendering of the report gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable text (the default).
    #[default]
    Text,
    /// A `serde_json` document carrying the same data.
    Json,
}

/// Everything the renderer needs, captured once at report time.
#[derive(Debug, Clone)]
pub struct ReportData {
    /// When the report was generated; injected so rendering stays pure.
    pub generated_at: DateTime<Utc>,

    /// Timing aggregates snapshotted from the collector.
    pub timing: TimingSummary,

    /// The joined event-log text, empty when nothing was logged.
    pub event_log: String,

    /// Units of compilation, in the host's order.
    pub units: Vec<CompilationUnit>,
}

/// Share of `part` in `whole` as a percentage; `0.0` when `whole` is zero.
fn percent(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.as_secs_f64() / whole.as_secs_f64() * 100.0
    }
}

/// Per-task rows sorted by duration descending; the sort is stable, so ties
/// keep their completion order.
fn sorted_rows(timing: &TimingSummary) -> Vec<&TaskDuration> {
    let mut rows: Vec<&TaskDuration> = timing.per_task.iter().collect();
    rows.sort_by_key(|entry| Reverse(entry.took));
    rows
}

/// Renders the human-readable report text.
#[must_use]
pub fn render_report(data: &ReportData) -> String {
    let instrumented = data.timing.instrumented_total();
    let share = percent(instrumented, data.timing.total_all_tasks);

    let mut overview = format!(
        "Build finished at {}\n",
        data.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    write!(
        overview,
        "Instrumented tasks took {} ({share:.1}% of all task time)",
        format_secs(instrumented)
    )
    .unwrap();

    let mut table = TextTable::new(["Time", "% of instrumented time", "Task"]);
    for entry in sorted_rows(&data.timing) {
        let row_share = percent(entry.took, instrumented);
        table.add_row([
            format_secs(entry.took),
            format!("{row_share:.1}%"),
            entry.task.to_string(),
        ]);
    }

    let mut sections = vec![overview, table.render()];
    if !data.event_log.is_empty() {
        sections.push(data.event_log.clone());
    }
    sections.push(render_units(&data.units));

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

/// Renders the units-of-compilation listing.
fn render_units(units: &[CompilationUnit]) -> String {
    let mut out = String::from("Units of compilation:");
    for unit in units {
        write!(out, "\n  {} ({})", unit.name, unit.project_path.display()).unwrap();
        write!(out, "\n    build history: {}", unit.history_path.display()).unwrap();
        write!(out, "\n    build output: {}", unit.output_path.display()).unwrap();
        for source in &unit.sources {
            write!(out, "\n    {}", source.display()).unwrap();
        }
    }
    out
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    total_all_tasks_ms: u64,
    instrumented_ms: u64,
    instrumented_percent: f64,
    tasks: Vec<JsonTask>,
    event_log: Vec<&'a str>,
    units: &'a [CompilationUnit],
}

#[derive(Debug, Serialize)]
struct JsonTask {
    task: String,
    took_ms: u64,
    percent_of_instrumented: f64,
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Rounds a percentage to one decimal place, matching the text rendering.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Renders the report as a pretty-printed JSON document.
pub fn render_report_json(data: &ReportData) -> Result<String, serde_json::Error> {
    let instrumented = data.timing.instrumented_total();

    let tasks = sorted_rows(&data.timing)
        .into_iter()
        .map(|entry| JsonTask {
            task: entry.task.to_string(),
            took_ms: millis(entry.took),
            percent_of_instrumented: round_tenths(percent(entry.took, instrumented)),
        })
        .collect();

    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_all_tasks_ms: millis(data.timing.total_all_tasks),
        instrumented_ms: millis(instrumented),
        instrumented_percent: round_tenths(percent(instrumented, data.timing.total_all_tasks)),
        tasks,
        event_log: data.event_log.lines().collect(),
        units: &data.units,
    };

    serde_json::to_string_pretty(&report)
}
