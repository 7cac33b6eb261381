//! HTTP client for the form-layout analysis service.
//!
//! The service follows a submit-then-poll protocol: a POST of the document
//! bytes returns `202 Accepted` with an `Operation-Location` header, which
//! is polled until the operation reports `succeeded` or `failed`.
//!
//! Clients are explicitly constructed from an endpoint and key and passed
//! to callers as [`crate::LayoutAnalyzer`] handles; there is no process-wide
//! singleton.

use crate::error::{AnalysisError, Result};
use crate::wire::{AnalyzeResult, LayoutAnalysis};
use crate::LayoutAnalyzer;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Document model used for table/checkbox extraction
const LAYOUT_MODEL: &str = "prebuilt-document";

/// Document model used for plain text reads (OCR)
const READ_MODEL: &str = "prebuilt-read";

/// API version pinned for both models
const API_VERSION: &str = "2023-07-31";

/// Default delay between status polls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default maximum number of status polls before giving up
const DEFAULT_MAX_POLLS: u32 = 60;

/// Poll response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationStatus {
    status: String,
    #[serde(default)]
    error: Option<OperationError>,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
}

/// Error detail in a failed operation.
#[derive(Debug, Deserialize)]
struct OperationError {
    #[serde(default)]
    message: String,
}

/// Blocking HTTP client for the analysis service.
pub struct FormApiClient {
    http: Client,
    endpoint: String,
    key: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl FormApiClient {
    /// Create a client for the given service endpoint and key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            key: key.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// Set the delay between status polls
    #[inline]
    #[must_use = "returns a client with the poll interval configured"]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the maximum number of status polls
    #[inline]
    #[must_use = "returns a client with the poll budget configured"]
    pub const fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Submit a document and poll until the operation finishes.
    fn submit_and_poll(&self, model: &str, data: &[u8]) -> Result<AnalyzeResult> {
        let url = format!(
            "{}/formrecognizer/documentModels/{model}:analyze?api-version={API_VERSION}",
            self.endpoint
        );

        let response = self
            .http
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/octet-stream")
            .body(data.to_vec())
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(AnalysisError::Api { status, message });
        }

        let operation_url = response
            .headers()
            .get("Operation-Location")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or(AnalysisError::MissingOperationLocation)?;

        for attempt in 0..self.max_polls {
            if attempt > 0 {
                std::thread::sleep(self.poll_interval);
            }

            let status: OperationStatus = self
                .http
                .get(&operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.key)
                .send()?
                .json()
                .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

            match status.status.as_str() {
                "succeeded" => {
                    return status.analyze_result.ok_or_else(|| {
                        AnalysisError::MalformedResponse(
                            "succeeded operation carried no analyzeResult".to_string(),
                        )
                    });
                }
                "failed" => {
                    let message = status.error.map_or_else(String::new, |e| e.message);
                    return Err(AnalysisError::OperationFailed(message));
                }
                // notStarted / running keep polling
                other => log::debug!("analysis operation status: {other}"),
            }
        }

        Err(AnalysisError::Timeout {
            attempts: self.max_polls,
        })
    }
}

impl LayoutAnalyzer for FormApiClient {
    fn analyze(&self, data: &[u8]) -> Result<LayoutAnalysis> {
        let result = self.submit_and_poll(LAYOUT_MODEL, data)?;
        Ok(LayoutAnalysis::from(result))
    }

    fn read_text(&self, data: &[u8]) -> Result<String> {
        let result = self.submit_and_poll(READ_MODEL, data)?;

        let mut text = String::new();
        for page in result.pages {
            for line in page.lines {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&line.content);
            }
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let client = FormApiClient::new("https://svc.example.com/", "key").unwrap();
        assert_eq!(client.endpoint, "https://svc.example.com");
    }

    #[test]
    fn test_operation_status_parses_succeeded_envelope() {
        let json = r#"{
            "status": "succeeded",
            "analyzeResult": {"pages": [], "tables": []}
        }"#;
        let status: OperationStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, "succeeded");
        assert!(status.analyze_result.is_some());
    }

    #[test]
    fn test_operation_status_parses_failure_envelope() {
        let json = r#"{"status": "failed", "error": {"message": "quality too low"}}"#;
        let status: OperationStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, "failed");
        assert_eq!(status.error.unwrap().message, "quality too low");
    }
}
