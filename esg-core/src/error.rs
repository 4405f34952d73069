//! Error taxonomy for the ESG core.
//!
//! Every failure is recoverable by the caller; nothing in this crate exits
//! the process or swallows an error into a log line.

use std::path::PathBuf;

/// Error types for ESG operations.
#[derive(Debug, thiserror::Error)]
pub enum EsgError {
    /// Input document does not exist
    #[error("Organization document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Document is not valid JSON or does not match the organization shape
    #[error("Malformed organization data: {0}")]
    MalformedData(String),

    /// Reporting framework is not one of GRI, SASB, TCFD
    #[error("Unsupported reporting framework: {0}")]
    UnsupportedFramework(String),

    /// A field is outside its documented range
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EsgError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for EsgError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EsgError>;
