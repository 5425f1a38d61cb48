//! Task classification.
//!
//! The collector measures every task but only reports the instrumented
//! subset in detail. Which tasks count as instrumented is policy supplied by
//! the embedder, expressed as the [`TaskClassifier`] capability.

use crate::types::TaskInfo;

/// Decides whether a task belongs to the instrumented toolchain subset.
///
/// Implementations must be pure: the collector may call them from any worker
/// thread and assumes the answer for a given task never changes within a run.
pub trait TaskClassifier: Send + Sync {
    /// Returns `true` if `task` should be measured and reported in detail.
    fn is_instrumented(&self, task: &TaskInfo) -> bool;
}

impl<F> TaskClassifier for F
where
    F: Fn(&TaskInfo) -> bool + Send + Sync,
{
    fn is_instrumented(&self, task: &TaskInfo) -> bool {
        self(task)
    }
}

/// Classifies a task as instrumented when its implementation type name
/// starts with one of a set of namespace prefixes.
///
/// This is the reference policy: a toolchain's tasks share a namespace
/// (e.g. `org.acme.toolchain.`), so matching on the type-name prefix selects
/// exactly that toolchain's tasks.
#[derive(Debug, Clone)]
pub struct TypePrefixClassifier {
    prefixes: Vec<String>,
}

impl TypePrefixClassifier {
    /// Creates a classifier matching the given type-name prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl TaskClassifier for TypePrefixClassifier {
    fn is_instrumented(&self, task: &TaskInfo) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| task.type_name.starts_with(prefix))
    }
}
