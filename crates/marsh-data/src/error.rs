//! Error types for the data loader.

use marsh_common::DataError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading input tables.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O error reading a file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed.
    #[error("{path}:{line}: {reason}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A required column is absent from the header.
    #[error("{path}: missing column '{column}'")]
    MissingColumn {
        /// File being parsed.
        path: PathBuf,
        /// Column name.
        column: &'static str,
    },

    /// Unrecognized RCP identifier.
    #[error("Unknown RCP '{0}' (expected rcp26, rcp45 or rcp85)")]
    UnknownRcp(String),

    /// The parsed rows violate a data model invariant.
    #[error("Invalid data: {0}")]
    Data(#[from] DataError),
}
