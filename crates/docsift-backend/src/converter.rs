//! Document converter: the single entry point for ingestion.
//!
//! Dispatches on the filename extension, walks email containers
//! recursively, and assembles the uniform [`IngestResult`]. One failing
//! attachment never fails the message: its entry carries an
//! `Invalid attachment` marker instead, matching the best-effort purpose
//! of the whole system.

use crate::csv::CsvBackend;
use crate::doc::DocBackend;
use crate::docx::DocxBackend;
use crate::html::HtmlBackend;
use crate::image::ImageBackend;
use crate::pdf::PdfBackend;
use crate::traits::{BackendOptions, DocumentBackend};
use crate::txt::TxtBackend;
use crate::xlsx::XlsxBackend;
use base64::Engine;
use docsift_analysis::LayoutAnalyzer;
use docsift_core::{
    DocsiftError, EmailDocument, ExtractedContent, IngestResult, InputFormat, ParsedAttachment,
};
use std::path::Path;
use std::sync::Arc;

/// Marker content recorded for attachments that could not be decoded.
const INVALID_ATTACHMENT: &str = "Invalid attachment";

/// Converts uploaded container files into the uniform result shape.
#[derive(Clone, Default)]
pub struct DocumentConverter {
    analyzer: Option<Arc<dyn LayoutAnalyzer>>,
    options: BackendOptions,
}

impl DocumentConverter {
    /// Create a converter without layout analysis
    #[inline]
    #[must_use = "creates a converter that should be used"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a form-layout analysis collaborator
    #[must_use = "returns a converter with the analyzer configured"]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn LayoutAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Set backend options
    #[inline]
    #[must_use = "returns a converter with options configured"]
    pub const fn with_options(mut self, options: BackendOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its extension is not a
    /// supported upload format, or the top-level container cannot be
    /// parsed.
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestResult, DocsiftError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        self.convert_bytes(&filename, &data)
    }

    /// Convert an uploaded payload.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported upload extensions or an unparseable
    /// top-level container. Attachment-level failures degrade to marker
    /// entries instead.
    pub fn convert_bytes(&self, filename: &str, data: &[u8]) -> Result<IngestResult, DocsiftError> {
        let format = InputFormat::from_path(filename).ok_or_else(|| {
            DocsiftError::FormatError(format!("unsupported file type: {filename}"))
        })?;

        log::info!("converting {filename} as {format}");

        match format {
            InputFormat::Eml => self.convert_eml(data).map(IngestResult::Email),
            InputFormat::Msg => self.convert_msg(data).map(IngestResult::Email),
            _ => {
                let content = self.backend_for(format).extract(data, &self.options)?;
                Ok(IngestResult::Document {
                    filename: filename.to_string(),
                    filetype: extension_of(filename),
                    content,
                })
            }
        }
    }

    /// Walk an EML message and extract each attachment.
    fn convert_eml(&self, data: &[u8]) -> Result<EmailDocument, DocsiftError> {
        let email = docsift_email::parse_eml(data)
            .map_err(|e| DocsiftError::EmailError(e.to_string()))?;

        let attachments = email
            .attachments
            .iter()
            .enumerate()
            .map(|(index, att)| {
                let filename = att
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("attachment-{index}"));
                self.extract_attachment(&filename, &att.data)
            })
            .collect();

        Ok(EmailDocument {
            subject: email.subject,
            from: email.from,
            to: email.to,
            date: email.date,
            body: email.body,
            attachments,
        })
    }

    /// Walk an Outlook MSG message and extract each attachment.
    fn convert_msg(&self, data: &[u8]) -> Result<EmailDocument, DocsiftError> {
        let msg = docsift_email::parse_msg(data)
            .map_err(|e| DocsiftError::EmailError(e.to_string()))?;

        let attachments = msg
            .attachments
            .iter()
            .map(|att| self.extract_attachment(&att.filename, &att.data))
            .collect();

        Ok(EmailDocument {
            subject: msg.subject,
            from: msg.sender,
            to: msg.to,
            date: msg.date,
            body: msg.body,
            attachments,
        })
    }

    /// Extract one attachment, degrading failures to a marker entry.
    fn extract_attachment(&self, filename: &str, data: &[u8]) -> ParsedAttachment {
        let filetype = extension_of(filename);

        if let Some(max) = self.options.max_attachment_bytes {
            if data.len() > max {
                log::warn!(
                    "attachment {filename} is {} bytes, over the {max} byte cap",
                    data.len()
                );
                return ParsedAttachment {
                    filename: filename.to_string(),
                    filetype,
                    content: ExtractedContent::Text(INVALID_ATTACHMENT.to_string()),
                };
            }
        }

        let content = match InputFormat::from_path(filename) {
            // Nested email containers contribute their body text; their own
            // attachments are not walked further.
            Some(InputFormat::Eml) => docsift_email::parse_eml(data)
                .map(|nested| ExtractedContent::Text(nested.body))
                .map_err(|e| DocsiftError::EmailError(e.to_string())),
            Some(InputFormat::Msg) => docsift_email::parse_msg(data)
                .map(|nested| ExtractedContent::Text(nested.body))
                .map_err(|e| DocsiftError::EmailError(e.to_string())),
            Some(format) => self.backend_for(format).extract(data, &self.options),
            None => {
                log::debug!("no extractor for {filename}, passing payload through as base64");
                Ok(ExtractedContent::Base64 {
                    base64: base64::engine::general_purpose::STANDARD.encode(data),
                })
            }
        };

        let content = content.unwrap_or_else(|e| {
            log::warn!("failed to extract attachment {filename}: {e}");
            ExtractedContent::Text(INVALID_ATTACHMENT.to_string())
        });

        ParsedAttachment {
            filename: filename.to_string(),
            filetype,
            content,
        }
    }

    /// Backend instance for a non-container format.
    fn backend_for(&self, format: InputFormat) -> Box<dyn DocumentBackend> {
        match format {
            InputFormat::Txt => Box::new(TxtBackend::new()),
            InputFormat::Csv => Box::new(CsvBackend::new()),
            InputFormat::Xlsx => Box::new(XlsxBackend::new()),
            InputFormat::Html => Box::new(HtmlBackend::new()),
            InputFormat::Docx => Box::new(DocxBackend::new()),
            InputFormat::Doc => Box::new(DocBackend::new()),
            InputFormat::Pdf => match &self.analyzer {
                Some(analyzer) => Box::new(PdfBackend::with_analyzer(Arc::clone(analyzer))),
                None => Box::new(PdfBackend::new()),
            },
            InputFormat::Jpeg | InputFormat::Png => match &self.analyzer {
                Some(analyzer) => Box::new(ImageBackend::with_analyzer(Arc::clone(analyzer))),
                None => Box::new(ImageBackend::new()),
            },
            // Containers are handled in convert_bytes before dispatch.
            InputFormat::Eml | InputFormat::Msg => unreachable!("containers are walked, not decoded"),
        }
    }
}

/// Lowercased filename extension, empty when absent.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}
