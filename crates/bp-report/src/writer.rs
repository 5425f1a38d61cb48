//! Writing the rendered report to disk.

use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Report output errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The directory the report should land in does not exist.
    #[error("report directory does not exist: {}", path.display())]
    MissingParent { path: PathBuf },

    /// The output file already exists from an earlier run.
    #[error("report file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// An I/O error while creating or writing the file.
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes the rendered report to a pre-validated path.
///
/// Path problems are configuration errors and surface at construction,
/// before the embedder registers any listener with the host: the parent
/// directory must exist and the output file must not. The write itself
/// creates the file exclusively and flushes before closing.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Validates the output path and creates the writer.
    ///
    /// Fails when the parent directory is missing or the file already
    /// exists. Nothing is created on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let path = path.into();

        // A bare file name has an empty parent and writes to the working
        // directory, which always exists.
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(ReportError::MissingParent {
                    path: parent.to_path_buf(),
                });
            }
        }
        if path.exists() {
            return Err(ReportError::AlreadyExists { path });
        }

        Ok(Self { path })
    }

    /// The validated output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file and writes `text` to it, flushing before close.
    ///
    /// The file is created exclusively, so a file that appeared since
    /// construction fails here instead of being overwritten.
    pub fn write(&self, text: &str) -> Result<(), ReportError> {
        let io_err = |source| ReportError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = File::create_new(&self.path).map_err(io_err)?;
        file.write_all(text.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        Ok(())
    }
}
