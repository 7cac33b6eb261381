//! Plain text backend.

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};

/// Plain text backend. Payloads must be valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TxtBackend;

impl TxtBackend {
    /// Create a new TXT backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentBackend for TxtBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Txt
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|_| DocsiftError::BackendError("text payload is not valid UTF-8".to_string()))?;
        Ok(ExtractedContent::Text(text))
    }
}
