//! CSV backend.
//!
//! Parses CSV payloads into column-aligned plain text. The delimiter is
//! sniffed from the first line (comma, semicolon, tab, pipe, colon).

use crate::tabular::render_columns;
use crate::traits::{BackendOptions, DocumentBackend};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};

/// CSV document backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CsvBackend;

impl CsvBackend {
    /// Create a new CSV backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    /// Detect the delimiter by counting candidates on the first line.
    fn detect_delimiter(content: &str) -> u8 {
        let first_line = content.lines().next().unwrap_or_default();

        let delimiters = [b',', b';', b'\t', b'|', b':'];
        let mut best_delimiter = b',';
        let mut max_count = 0;

        for &delim in &delimiters {
            let count = first_line.bytes().filter(|&b| b == delim).count();
            if count > max_count {
                max_count = count;
                best_delimiter = delim;
            }
        }

        best_delimiter
    }
}

impl DocumentBackend for CsvBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let content = String::from_utf8_lossy(data);
        let delimiter = Self::detect_delimiter(&content);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| DocsiftError::BackendError(format!("CSV parse error: {e}")))?;
            rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
        }

        Ok(ExtractedContent::Text(render_columns(&rows)))
    }
}
