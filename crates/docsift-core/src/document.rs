//! Uniform result model for ingested documents.
//!
//! Every ingestion run produces one [`IngestResult`]: an email result with
//! per-attachment content entries, or a single-document result. The shapes
//! here are what the caller serializes; they carry the associator's
//! [`Checkbox`] and [`Table`] output verbatim.
//!
//! All values are request-scoped: built for one analysis call, serialized,
//! and discarded.

use crate::layout::Checkbox;
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Content extracted from one document or attachment.
///
/// Serialized untagged: plain text renders as a JSON string, analyzed
/// documents as an object, and unsupported payloads as a base64 wrapper
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedContent {
    /// Rich result for formats that go through layout analysis
    Analyzed(AnalyzedDocument),
    /// Raw payload passthrough for formats with no extractor
    Base64 {
        /// Base64-encoded original bytes
        base64: String,
    },
    /// Plain text for simple formats
    Text(String),
}

impl ExtractedContent {
    /// Plain-text view of the content, if it has one
    #[inline]
    #[must_use = "text view is returned but not used"]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Analyzed(doc) => Some(&doc.text),
            Self::Base64 { .. } => None,
        }
    }
}

/// Full analysis result for a PDF or image: extracted text plus the
/// associator's table and checkbox output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    /// Extracted full text
    pub text: String,
    /// Reconstructed tables
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Resolved checkboxes
    #[serde(default)]
    pub checkboxes: Vec<Checkbox>,
    /// Human-readable data-quality warnings raised during analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// One extracted email attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAttachment {
    /// Attachment filename as carried by the message
    pub filename: String,
    /// Lowercased filename extension, empty when absent
    pub filetype: String,
    /// Extracted content
    pub content: ExtractedContent,
}

/// Uniform result for an ingested email message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailDocument {
    /// Subject header
    pub subject: String,
    /// Sender
    pub from: String,
    /// Recipients
    pub to: Vec<String>,
    /// Date header, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Message body text
    pub body: String,
    /// Extracted attachments, in message order
    pub attachments: Vec<ParsedAttachment>,
}

/// Top-level ingestion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngestResult {
    /// An email container with its walked attachments
    Email(EmailDocument),
    /// A single uploaded document
    Document {
        /// Original filename
        filename: String,
        /// Lowercased filename extension
        filetype: String,
        /// Extracted content
        content: ExtractedContent,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SelectionState;

    #[test]
    fn test_text_content_serializes_as_bare_string() {
        let content = ExtractedContent::Text("hello".to_string());
        assert_eq!(serde_json::to_string(&content).unwrap(), "\"hello\"");
    }

    #[test]
    fn test_base64_content_serializes_as_wrapper_object() {
        let content = ExtractedContent::Base64 {
            base64: "AAEC".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&content).unwrap(),
            r#"{"base64":"AAEC"}"#
        );
    }

    #[test]
    fn test_analyzed_content_round_trip() {
        let content = ExtractedContent::Analyzed(AnalyzedDocument {
            text: "body".to_string(),
            tables: vec![Table {
                rows: vec![vec!["A".to_string(), String::new()]],
            }],
            checkboxes: vec![Checkbox {
                page: 1,
                state: SelectionState::Selected,
                option: Some("Yes".to_string()),
            }],
            warnings: Vec::new(),
        });

        let json = serde_json::to_string(&content).unwrap();
        let back: ExtractedContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_checkbox_triples_survive_result_serialization() {
        // The serialized result must reproduce page/state/option exactly.
        let checkboxes = vec![
            Checkbox {
                page: 2,
                state: SelectionState::Unselected,
                option: None,
            },
            Checkbox {
                page: 2,
                state: SelectionState::Selected,
                option: Some("Renew".to_string()),
            },
        ];
        let result = IngestResult::Document {
            filename: "form.pdf".to_string(),
            filetype: "pdf".to_string(),
            content: ExtractedContent::Analyzed(AnalyzedDocument {
                text: String::new(),
                tables: Vec::new(),
                checkboxes: checkboxes.clone(),
                warnings: Vec::new(),
            }),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: IngestResult = serde_json::from_str(&json).unwrap();
        let IngestResult::Document {
            content: ExtractedContent::Analyzed(doc),
            ..
        } = back
        else {
            panic!("wrong variant after round trip");
        };
        assert_eq!(doc.checkboxes, checkboxes);
    }

    #[test]
    fn test_email_document_round_trip() {
        let email = EmailDocument {
            subject: "Quarterly report".to_string(),
            from: "a@example.com".to_string(),
            to: vec!["b@example.com".to_string()],
            date: Some("Mon, 6 Jan 2025 09:00:00 +0000".to_string()),
            body: "See attached.".to_string(),
            attachments: vec![ParsedAttachment {
                filename: "notes.txt".to_string(),
                filetype: "txt".to_string(),
                content: ExtractedContent::Text("hi".to_string()),
            }],
        };

        let json = serde_json::to_string(&IngestResult::Email(email.clone())).unwrap();
        let back: IngestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IngestResult::Email(email));
    }
}
