//! Compilation units listed at the end of the report.

use std::path::PathBuf;

use bp_core::UnitName;
use serde::{Deserialize, Serialize};

/// A module's compilation unit: its locations and the sources it owns.
///
/// Units are supplied by the host; this crate only iterates and renders
/// them, it never constructs or mutates them on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// The module's name.
    pub name: UnitName,

    /// Path of the module's project directory.
    pub project_path: PathBuf,

    /// Where the module's build history lives.
    pub history_path: PathBuf,

    /// Where the module's build output lives.
    pub output_path: PathBuf,

    /// Source files owned by the unit, in the host's order.
    pub sources: Vec<PathBuf>,
}

/// Supplies the compilation-unit listing, queried once at report time.
pub trait UnitSource: Send + Sync {
    /// Returns the units to list, in rendering order.
    fn units(&self) -> Vec<CompilationUnit>;
}

impl UnitSource for Vec<CompilationUnit> {
    fn units(&self) -> Vec<CompilationUnit> {
        self.clone()
    }
}
