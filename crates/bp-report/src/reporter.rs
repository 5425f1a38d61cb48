//! The terminal reporting step.

use std::path::PathBuf;
use std::sync::Arc;

use bp_core::collector::TaskCollector;
use bp_core::events::BuildObserver;
use chrono::Utc;

use crate::render::{ReportData, ReportFormat, render_report, render_report_json};
use crate::unit::UnitSource;
use crate::writer::{ReportError, ReportWriter};

/// Renders and writes the end-of-run report when the build finishes.
///
/// The reporter composes the collector's snapshot with the host's unit
/// listing and a pre-validated output path. It implements [`BuildObserver`];
/// the host registers it for the terminal callback independently of the
/// collector's task-event registration.
///
/// Failures after construction never reach the host: a failed write is
/// reported through `tracing` and swallowed, because instrumentation is
/// ancillary to the build's primary purpose.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use bp_core::{NoOutcomes, TaskCollector, TypePrefixClassifier};
/// use bp_report::BuildReporter;
///
/// let collector = Arc::new(TaskCollector::new(
///     TypePrefixClassifier::new(["org.acme.toolchain."]),
///     NoOutcomes,
/// ));
/// let units: Vec<bp_report::CompilationUnit> = Vec::new();
/// let reporter = BuildReporter::new(
///     Arc::clone(&collector),
///     units,
///     "build/reports/task-times.txt",
/// )?;
/// // register `collector` for task events and `reporter` for the
/// // build-finished event with the host engine
/// # Ok::<(), bp_report::ReportError>(())
/// ```
pub struct BuildReporter {
    collector: Arc<TaskCollector>,
    units: Box<dyn UnitSource>,
    writer: ReportWriter,
    format: ReportFormat,
}

impl BuildReporter {
    /// Creates a text reporter writing to `output_path`.
    ///
    /// Fails fast on a missing parent directory or a pre-existing output
    /// file, before any event is processed.
    pub fn new(
        collector: Arc<TaskCollector>,
        units: impl UnitSource + 'static,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self, ReportError> {
        Self::with_format(collector, units, output_path, ReportFormat::Text)
    }

    /// Creates a reporter with an explicit output format.
    pub fn with_format(
        collector: Arc<TaskCollector>,
        units: impl UnitSource + 'static,
        output_path: impl Into<PathBuf>,
        format: ReportFormat,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            collector,
            units: Box::new(units),
            writer: ReportWriter::new(output_path)?,
            format,
        })
    }
}

impl BuildObserver for BuildReporter {
    fn build_finished(&self) {
        let snapshot = self.collector.snapshot();
        let data = ReportData {
            generated_at: Utc::now(),
            timing: snapshot.timing,
            event_log: snapshot.event_log,
            units: self.units.units(),
        };

        let text = match self.format {
            ReportFormat::Text => render_report(&data),
            ReportFormat::Json => match render_report_json(&data) {
                Ok(text) => text,
                Err(error) => {
                    tracing::error!(%error, "failed to serialize build report");
                    return;
                }
            },
        };

        match self.writer.write(&text) {
            Ok(()) => {
                tracing::info!(path = %self.writer.path().display(), "build report written");
            }
            Err(error) => {
                tracing::error!(
                    path = %self.writer.path().display(),
                    %error,
                    "failed to write build report",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bp_core::classify::TypePrefixClassifier;
    use bp_core::events::TaskObserver;
    use bp_core::outcome::NoOutcomes;
    use bp_core::types::{TaskId, TaskInfo, UnitName};

    use super::*;
    use crate::unit::CompilationUnit;

    const TOOLCHAIN: &str = "org.acme.toolchain.";

    fn collector() -> Arc<TaskCollector> {
        Arc::new(TaskCollector::new(
            TypePrefixClassifier::new([TOOLCHAIN]),
            NoOutcomes,
        ))
    }

    fn task(id: &str) -> TaskInfo {
        TaskInfo::new(
            TaskId::new(id).expect("valid test id"),
            format!("{TOOLCHAIN}CompileTask"),
        )
    }

    fn unit() -> CompilationUnit {
        CompilationUnit {
            name: UnitName::new("app").unwrap(),
            project_path: PathBuf::from("demo/app"),
            history_path: PathBuf::from(".history/app"),
            output_path: PathBuf::from("target/app"),
            sources: vec![PathBuf::from("src/main.rs")],
        }
    }

    #[test]
    fn writes_report_on_build_finished() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let collector = collector();
        let reporter = BuildReporter::new(Arc::clone(&collector), vec![unit()], &path).unwrap();

        let compile = task(":app:compileMain");
        collector.task_started(&compile);
        collector.task_finished(&compile, None);
        reporter.build_finished();

        let report = std::fs::read_to_string(&path).unwrap();
        assert!(report.contains("Instrumented tasks took"));
        assert!(report.contains(":app:compileMain"));
        assert!(report.contains("Units of compilation:"));
        assert!(report.contains("  app (demo/app)"));
    }

    #[test]
    fn report_sections_appear_in_contract_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let collector = collector();
        let reporter = BuildReporter::new(Arc::clone(&collector), vec![unit()], &path).unwrap();

        let compile = task(":app:compileMain");
        collector.task_started(&compile);
        collector.task_finished(&compile, None);
        reporter.build_finished();

        let report = std::fs::read_to_string(&path).unwrap();
        let overview = report.find("Instrumented tasks took").unwrap();
        let table = report.find("Time").unwrap();
        let log = report.find("Executed :app:compileMain").unwrap();
        let units = report.find("Units of compilation:").unwrap();
        assert!(overview < table && table < log && log < units);
    }

    #[test]
    fn construction_fails_before_any_event_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("report.txt");

        let result = BuildReporter::new(collector(), Vec::<CompilationUnit>::new(), path);
        assert!(matches!(result, Err(ReportError::MissingParent { .. })));
    }

    #[test]
    fn construction_fails_before_any_event_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "stale").unwrap();

        let result = BuildReporter::new(collector(), Vec::<CompilationUnit>::new(), path);
        assert!(matches!(result, Err(ReportError::AlreadyExists { .. })));
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let collector = collector();
        let reporter =
            BuildReporter::new(Arc::clone(&collector), Vec::<CompilationUnit>::new(), &path)
                .unwrap();

        // The file appears between construction and the terminal event
        std::fs::write(&path, "raced").unwrap();
        reporter.build_finished();

        // No panic, and the pre-existing content is untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "raced");
    }

    #[test]
    fn json_format_writes_a_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let collector = collector();
        let reporter = BuildReporter::with_format(
            Arc::clone(&collector),
            vec![unit()],
            &path,
            ReportFormat::Json,
        )
        .unwrap();

        let compile = task(":app:compileMain");
        collector.task_started(&compile);
        collector.task_finished(&compile, None);
        reporter.build_finished();

        let report = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["tasks"][0]["task"], ":app:compileMain");
        assert_eq!(value["units"][0]["name"], "app");
    }
}
