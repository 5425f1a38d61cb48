//! Task timing collection for build instrumentation.
//!
//! This crate contains the concurrency-sensitive kernel of the collector:
//! - Timing: pairing start/finish events and aggregating durations
//! - Classification: deciding which tasks belong to the instrumented subset
//! - Event log: ordered per-task result blocks for the final report
//!
//! The host build engine drives everything through the capability traits in
//! [`events`]; rendering and writing the end-of-run report live in the
//! companion report crate.

pub mod classify;
pub mod collector;
pub mod events;
pub mod log;
pub mod outcome;
pub mod timing;
pub mod types;

pub use classify::{TaskClassifier, TypePrefixClassifier};
pub use collector::{RunSnapshot, TaskCollector};
pub use events::{BuildObserver, TaskObserver};
pub use log::EventLog;
pub use outcome::{NoOutcomes, OutcomeSource, TaskOutcome};
pub use timing::{TaskDuration, TimingStore, TimingSummary, format_secs};
pub use types::{TaskId, TaskInfo, UnitName, ValidationError};
