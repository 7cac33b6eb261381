//! Microsoft Excel (.xlsx) backend using calamine.

use crate::tabular::render_columns;
use crate::traits::{BackendOptions, DocumentBackend};
use calamine::{Data, Reader, Xlsx};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};
use std::io::Cursor;

/// XLSX document backend. Extracts the first worksheet as aligned text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XlsxBackend;

impl XlsxBackend {
    /// Create a new XLSX backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        }
    }
}

impl DocumentBackend for XlsxBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Xlsx
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let mut workbook = Xlsx::new(Cursor::new(data.to_vec()))
            .map_err(|e| DocsiftError::BackendError(format!("XLSX open error: {e}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DocsiftError::BackendError("workbook has no sheets".to_string()))?
            .map_err(|e| DocsiftError::BackendError(format!("XLSX read error: {e}")))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(Self::cell_to_string).collect())
            .collect();

        Ok(ExtractedContent::Text(render_columns(&rows)))
    }
}
