//! Core trait definitions for document backends

use docsift_core::{DocsiftError, ExtractedContent, InputFormat};

/// Options for backend processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendOptions {
    /// Suppress checkboxes whose resolved label was already used earlier in
    /// the same document (first occurrence wins). Off by default.
    pub dedupe_checkbox_labels: bool,

    /// Maximum attachment payload size in bytes (None = unlimited).
    /// Oversized attachments are rejected instead of decoded.
    pub max_attachment_bytes: Option<usize>,
}

impl BackendOptions {
    /// Set checkbox label deduplication
    #[inline]
    #[must_use = "returns options with deduplication configured"]
    pub const fn with_dedupe_checkbox_labels(mut self, enable: bool) -> Self {
        self.dedupe_checkbox_labels = enable;
        self
    }

    /// Set the maximum attachment payload size
    #[inline]
    #[must_use = "returns options with the size cap configured"]
    pub const fn with_max_attachment_bytes(mut self, max: Option<usize>) -> Self {
        self.max_attachment_bytes = max;
        self
    }
}

/// Main trait for document backends.
///
/// Each backend (CSV, XLSX, PDF, ...) decodes one format's payload into the
/// uniform [`ExtractedContent`] shape.
pub trait DocumentBackend: Send + Sync {
    /// The format this backend handles
    fn format(&self) -> InputFormat;

    /// Decode a document payload.
    ///
    /// # Errors
    /// Returns an error if the payload cannot be decoded as this format.
    fn extract(
        &self,
        data: &[u8],
        options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError>;

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: InputFormat) -> bool {
        self.format() == format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_options_default() {
        let opts = BackendOptions::default();
        assert!(!opts.dedupe_checkbox_labels);
        assert!(opts.max_attachment_bytes.is_none());
    }

    #[test]
    fn test_backend_options_builders() {
        let opts = BackendOptions::default()
            .with_dedupe_checkbox_labels(true)
            .with_max_attachment_bytes(Some(1024));
        assert!(opts.dedupe_checkbox_labels);
        assert_eq!(opts.max_attachment_bytes, Some(1024));
    }
}
