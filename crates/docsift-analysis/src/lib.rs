//! docsift-analysis - Form-layout analysis collaborator for docsift
//!
//! The backends hand whole documents (PDF bytes, image bytes) to an
//! external analysis service that detects selection marks, text lines and
//! table cells. This crate owns that boundary:
//!
//! - [`LayoutAnalyzer`]: the collaborator trait the backends depend on.
//!   Implementations are constructed explicitly and passed in, so callers
//!   can be tested with an in-memory fake.
//! - [`FormApiClient`]: the HTTP implementation (submit, poll, decode).
//! - [`StaticAnalyzer`]: canned in-memory implementation for tests.
//! - [`analyze_document`]: orchestration that feeds the service's
//!   detections through the core associator. When the collaborator fails
//!   it degrades to an empty result, since a partial result always beats
//!   a failed ingestion.

/// HTTP client implementation
pub mod client;
/// Error types for the analysis boundary
pub mod error;
/// Wire payload model and conversion to core types
pub mod wire;

pub use client::FormApiClient;
pub use error::{AnalysisError, Result};
pub use wire::{AnalyzeResult, DetectedTable, LayoutAnalysis};

use docsift_core::layout::{associate, AssociatorOptions, Checkbox, LayoutWarning};
use docsift_core::table::{assemble_table, Table};

/// External capability that turns document bytes into layout detections.
///
/// Implementations must be cheap to share; the converter holds one handle
/// for the lifetime of a request batch.
pub trait LayoutAnalyzer: Send + Sync {
    /// Run form-layout analysis (selection marks, lines, tables).
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached, rejects the
    /// document, or responds with a malformed payload.
    fn analyze(&self, data: &[u8]) -> Result<LayoutAnalysis>;

    /// Run a plain text read (OCR) over the document.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::analyze`].
    fn read_text(&self, data: &[u8]) -> Result<String>;
}

/// Tables and checkboxes extracted from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentLayout {
    /// Reconstructed tables, one grid per detected table
    pub tables: Vec<Table>,
    /// Resolved checkboxes
    pub checkboxes: Vec<Checkbox>,
    /// Data-quality warnings from association and assembly
    pub warnings: Vec<LayoutWarning>,
}

/// Analyze a document and run the layout associator over the detections.
///
/// Collaborator failures are absorbed here: the document still yields a
/// result, just with no tables or checkboxes, and the failure is logged.
#[must_use = "document layout is computed but not used"]
pub fn analyze_document(
    analyzer: &dyn LayoutAnalyzer,
    data: &[u8],
    options: AssociatorOptions,
) -> DocumentLayout {
    let analysis = match analyzer.analyze(data) {
        Ok(analysis) => analysis,
        Err(e) => {
            log::warn!("layout analysis failed, continuing without tables/checkboxes: {e}");
            return DocumentLayout::default();
        }
    };

    layout_from_analysis(&analysis, options)
}

/// Run association and table assembly over already-fetched detections.
#[must_use = "document layout is computed but not used"]
pub fn layout_from_analysis(
    analysis: &LayoutAnalysis,
    options: AssociatorOptions,
) -> DocumentLayout {
    let association = associate(&analysis.marks, &analysis.lines, options);

    let mut tables = Vec::with_capacity(analysis.tables.len());
    let mut warnings = association.warnings;

    for detected in &analysis.tables {
        let outcome = assemble_table(&detected.cells, detected.column_count);
        tables.push(outcome.table);
        warnings.extend(outcome.warnings);
    }

    DocumentLayout {
        tables,
        checkboxes: association.checkboxes,
        warnings,
    }
}

/// In-memory analyzer returning canned results.
///
/// Exists so converter and backend callers can be exercised without the
/// remote service.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    /// Canned layout analysis
    pub analysis: LayoutAnalysis,
    /// Canned read text
    pub text: String,
    /// When set, every call fails with an operation error
    pub fail: bool,
}

impl StaticAnalyzer {
    /// Analyzer returning the given detections and read text
    #[must_use = "analyzer is created but not used"]
    pub fn new(analysis: LayoutAnalysis, text: impl Into<String>) -> Self {
        Self {
            analysis,
            text: text.into(),
            fail: false,
        }
    }

    /// Analyzer that fails every call, for degrade-path tests
    #[must_use = "analyzer is created but not used"]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl LayoutAnalyzer for StaticAnalyzer {
    fn analyze(&self, _data: &[u8]) -> Result<LayoutAnalysis> {
        if self.fail {
            return Err(AnalysisError::OperationFailed("static failure".to_string()));
        }
        Ok(self.analysis.clone())
    }

    fn read_text(&self, _data: &[u8]) -> Result<String> {
        if self.fail {
            return Err(AnalysisError::OperationFailed("static failure".to_string()));
        }
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::geometry::{Point, Polygon};
    use docsift_core::layout::{SelectionMark, SelectionState, TextLine};
    use docsift_core::table::TableCell;

    fn sample_analysis() -> LayoutAnalysis {
        LayoutAnalysis {
            marks: vec![SelectionMark {
                page: 1,
                state: SelectionState::Selected,
                polygon: Polygon::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
            }],
            lines: vec![TextLine {
                page: 1,
                text: "Approve".to_string(),
                polygon: Polygon::new(vec![Point::new(3.0, 1.0), Point::new(4.0, 2.0)]),
            }],
            tables: vec![DetectedTable {
                column_count: 2,
                cells: vec![
                    TableCell::new(0, 0, 1, "A".to_string()),
                    TableCell::new(0, 1, 1, "B".to_string()),
                ],
            }],
        }
    }

    #[test]
    fn test_analyze_document_runs_associator() {
        let analyzer = StaticAnalyzer::new(sample_analysis(), "ignored");
        let layout = analyze_document(&analyzer, b"doc", AssociatorOptions::default());

        assert_eq!(layout.checkboxes.len(), 1);
        assert_eq!(layout.checkboxes[0].option.as_deref(), Some("Approve"));
        assert_eq!(layout.tables.len(), 1);
        assert_eq!(layout.tables[0].get(0, 1), Some("B"));
        assert!(layout.warnings.is_empty());
    }

    #[test]
    fn test_analyzer_failure_degrades_to_empty_layout() {
        let analyzer = StaticAnalyzer::failing();
        let layout = analyze_document(&analyzer, b"doc", AssociatorOptions::default());

        assert!(layout.tables.is_empty());
        assert!(layout.checkboxes.is_empty());
    }

    #[test]
    fn test_warnings_are_merged_across_tables_and_marks() {
        let mut analysis = sample_analysis();
        // Empty polygon on the mark and an out-of-range cell.
        analysis.marks[0].polygon = Polygon::default();
        analysis.tables[0].cells.push(TableCell::new(0, 9, 1, "x".to_string()));

        let layout = layout_from_analysis(&analysis, AssociatorOptions::default());
        assert_eq!(layout.warnings.len(), 2);
        assert!(layout.checkboxes.is_empty());
        assert_eq!(layout.tables[0].num_cols(), 2);
    }

    #[test]
    fn test_dedupe_option_flows_through() {
        let mut analysis = sample_analysis();
        let duplicate = analysis.marks[0].clone();
        analysis.marks.push(duplicate);

        let kept = layout_from_analysis(&analysis, AssociatorOptions::default());
        assert_eq!(kept.checkboxes.len(), 2);

        let deduped = layout_from_analysis(
            &analysis,
            AssociatorOptions::default().with_dedupe_labels(true),
        );
        assert_eq!(deduped.checkboxes.len(), 1);
    }
}
