//! Error types for asset import.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while importing geometry or material files.
///
/// Only I/O failures are errors. Malformed records inside a readable file
/// degrade to default values instead (see [`crate::gfx::geometry::obj`]).
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but reading it failed part way through.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// Path of the file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ImportError::Open { path, .. } | ImportError::Read { path, .. } => path,
        }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
