//! Image backend (JPEG, PNG).
//!
//! Images carry no native text; both the text read (OCR) and the
//! form-layout analysis go through the injected collaborator.

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_analysis::{analyze_document, LayoutAnalyzer};
use docsift_core::document::AnalyzedDocument;
use docsift_core::layout::AssociatorOptions;
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};
use std::sync::Arc;

/// Raster image backend, shared by JPEG and PNG
#[derive(Clone, Default)]
pub struct ImageBackend {
    analyzer: Option<Arc<dyn LayoutAnalyzer>>,
}

impl ImageBackend {
    /// Create a backend without an analyzer; every extraction fails until
    /// one is attached
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend using the given analysis collaborator
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub fn with_analyzer(analyzer: Arc<dyn LayoutAnalyzer>) -> Self {
        Self {
            analyzer: Some(analyzer),
        }
    }
}

impl DocumentBackend for ImageBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Jpeg
    }

    fn can_handle(&self, format: InputFormat) -> bool {
        format.is_image()
    }

    fn extract(
        &self,
        data: &[u8],
        options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let Some(analyzer) = self.analyzer.as_deref() else {
            return Err(DocsiftError::BackendError(
                "image extraction requires the analysis service".to_string(),
            ));
        };

        let text = analyzer.read_text(data).unwrap_or_else(|e| {
            log::warn!("OCR read failed, continuing with empty text: {e}");
            String::new()
        });

        let layout = analyze_document(
            analyzer,
            data,
            AssociatorOptions::default().with_dedupe_labels(options.dedupe_checkbox_labels),
        );

        Ok(ExtractedContent::Analyzed(AnalyzedDocument {
            text,
            tables: layout.tables,
            checkboxes: layout.checkboxes,
            warnings: layout.warnings.iter().map(ToString::to_string).collect(),
        }))
    }
}
