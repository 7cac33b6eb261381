//! Error types for document ingestion operations.
//!
//! This module defines the error taxonomy shared across the workspace.
//! Per-record data-quality problems (a malformed polygon, an out-of-range
//! table index) are deliberately *not* errors: the associator skips the
//! offending record and reports a [`crate::layout::LayoutWarning`] instead,
//! so one bad detection never fails a whole document.

use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, DocsiftError>;

/// Error types that can occur while ingesting a document.
///
/// # Examples
///
/// ```rust,ignore
/// use docsift_backend::DocumentConverter;
/// use docsift_core::DocsiftError;
///
/// let converter = DocumentConverter::new();
///
/// match converter.convert_path("report.pdf") {
///     Ok(result) => println!("ok"),
///     Err(DocsiftError::IoError(e)) => eprintln!("file error: {e}"),
///     Err(DocsiftError::FormatError(msg)) => eprintln!("unsupported format: {msg}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocsiftError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input format could not be detected or is not supported
    #[error("Format error: {0}")]
    FormatError(String),

    /// A format backend failed to decode the payload
    #[error("Backend error: {0}")]
    BackendError(String),

    /// The email walker failed to parse the container
    #[error("Email error: {0}")]
    EmailError(String),

    /// The remote analysis collaborator failed
    #[error("Analysis error: {0}")]
    AnalysisError(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
