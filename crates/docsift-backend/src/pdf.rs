//! PDF backend.
//!
//! Text-based PDFs yield their text natively via lopdf. Scanned PDFs (no
//! page with extractable text) are read through the analysis service's OCR
//! instead. Either way, when an analyzer is configured the document also
//! goes through form-layout analysis to recover tables and checkboxes.

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_analysis::{analyze_document, DocumentLayout, LayoutAnalyzer};
use docsift_core::document::AnalyzedDocument;
use docsift_core::layout::AssociatorOptions;
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};
use lopdf::Document as PdfDocument;
use std::sync::Arc;

/// PDF document backend
#[derive(Clone, Default)]
pub struct PdfBackend {
    analyzer: Option<Arc<dyn LayoutAnalyzer>>,
}

impl PdfBackend {
    /// Create a backend without layout analysis (native text only)
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that runs OCR and form-layout analysis through the
    /// given collaborator
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub fn with_analyzer(analyzer: Arc<dyn LayoutAnalyzer>) -> Self {
        Self {
            analyzer: Some(analyzer),
        }
    }

    /// Whether any page carries extractable text.
    fn is_text_based(doc: &PdfDocument) -> bool {
        doc.get_pages().keys().any(|&page| {
            doc.extract_text(&[page])
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false)
        })
    }

    /// Concatenate the native text of every page.
    fn native_text(doc: &PdfDocument) -> String {
        let mut text = String::new();
        for &page in doc.get_pages().keys() {
            match doc.extract_text(&[page]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => log::warn!("failed to extract text from PDF page {page}: {e}"),
            }
        }
        text
    }

    fn run_layout(&self, data: &[u8], options: &BackendOptions) -> DocumentLayout {
        self.analyzer.as_deref().map_or_else(DocumentLayout::default, |analyzer| {
            analyze_document(
                analyzer,
                data,
                AssociatorOptions::default()
                    .with_dedupe_labels(options.dedupe_checkbox_labels),
            )
        })
    }
}

impl DocumentBackend for PdfBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Pdf
    }

    fn extract(
        &self,
        data: &[u8],
        options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| DocsiftError::BackendError(format!("PDF open error: {e}")))?;

        let text = if Self::is_text_based(&doc) {
            Self::native_text(&doc)
        } else if let Some(analyzer) = self.analyzer.as_deref() {
            log::debug!("PDF has no native text, reading through OCR");
            analyzer.read_text(data).unwrap_or_else(|e| {
                log::warn!("OCR read failed, continuing with empty text: {e}");
                String::new()
            })
        } else {
            return Err(DocsiftError::BackendError(
                "scanned PDF requires the analysis service".to_string(),
            ));
        };

        let layout = self.run_layout(data, options);

        Ok(ExtractedContent::Analyzed(AnalyzedDocument {
            text,
            tables: layout.tables,
            checkboxes: layout.checkboxes,
            warnings: layout.warnings.iter().map(ToString::to_string).collect(),
        }))
    }
}
