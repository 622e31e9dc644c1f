//! Error types for unoutline library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting outlines.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page text provider failed on a document.
    #[error("Extraction failed for {document}: {reason}")]
    Extraction {
        /// Document identifier
        document: String,
        /// Underlying cause
        reason: String,
    },

    /// No provider is registered for the document's format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Writing an outline artifact failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The provider did not return within the per-document timeout.
    #[error("Timed out after {seconds}s while loading {document}")]
    Timeout {
        /// Document identifier
        document: String,
        /// Timeout in seconds
        seconds: u64,
    },

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an extraction error for a document.
    pub fn extraction(document: impl Into<String>, reason: impl ToString) -> Self {
        Error::Extraction {
            document: document.into(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-readable name of the error kind, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Extraction { .. } => "extraction",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Write { .. } => "write",
            Error::Timeout { .. } => "timeout",
            Error::Json(_) => "json",
            Error::InvalidConfig(_) => "invalid_config",
            Error::Other(_) => "other",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
