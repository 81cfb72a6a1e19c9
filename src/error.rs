use std::path::PathBuf;

use thiserror::Error;

use crate::data::loader::FileFormat;

// ---------------------------------------------------------------------------
// Error taxonomy for loading and chart dispatch
// ---------------------------------------------------------------------------

/// Result type alias for dataset and chart operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Errors surfaced to the dashboard. None of them is fatal to the session.
#[derive(Debug, Error)]
pub enum EdaError {
    /// The declared format tag is not one we can read.
    #[error("unsupported file format: {format}")]
    UnsupportedFormat { format: String },

    /// The content does not parse under the declared format.
    #[error("failed to parse {format} data: {message}")]
    Parse { format: FileFormat, message: String },

    /// The chart request references missing, empty or wrong-kind columns.
    #[error("invalid selection: {message}")]
    InvalidSelection { message: String },

    /// Reading the file from disk failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EdaError {
    pub fn parse(format: FileFormat, message: impl Into<String>) -> Self {
        EdaError::Parse {
            format,
            message: message.into(),
        }
    }

    pub fn invalid_selection(message: impl Into<String>) -> Self {
        EdaError::InvalidSelection {
            message: message.into(),
        }
    }
}
