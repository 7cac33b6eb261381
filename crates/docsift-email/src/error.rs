//! Error types for email container walking

use std::io;
use thiserror::Error;

/// Result type for email parsing operations
pub type Result<T> = std::result::Result<T, EmailError>;

/// Email parsing errors
#[derive(Debug, Error)]
pub enum EmailError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// EML parse error
    #[error("Failed to parse email: {0}")]
    ParseError(String),

    /// Outlook MSG parse error
    #[error("Failed to parse MSG: {0}")]
    MsgError(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
