//! Error types for the analysis collaborator

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while talking to the form-layout service.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request
    #[error("Service returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The submit response carried no Operation-Location header to poll
    #[error("Submit response missing Operation-Location header")]
    MissingOperationLocation,

    /// The service reported the analysis operation as failed
    #[error("Analysis operation failed: {0}")]
    OperationFailed(String),

    /// Polling gave up before the operation finished
    #[error("Analysis did not finish within {attempts} polls")]
    Timeout {
        /// Number of polls performed
        attempts: u32,
    },

    /// The response body did not match the expected payload shape
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),
}
