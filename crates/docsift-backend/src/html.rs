//! HTML backend.
//!
//! Reduces an HTML document to its visible text using scraper. Script,
//! style and head content is dropped.

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};
use scraper::Html;

/// HTML document backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HtmlBackend;

impl HtmlBackend {
    /// Create a new HTML backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    /// Extract visible text, one line per text-node run.
    fn visible_text(html: &str) -> String {
        let document = Html::parse_document(html);
        let mut lines = Vec::new();

        for node in document.tree.nodes() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| matches!(el.name(), "script" | "style" | "head"))
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        lines.join("\n")
    }
}

impl DocumentBackend for HtmlBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Html
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let html = String::from_utf8_lossy(data);
        Ok(ExtractedContent::Text(Self::visible_text(&html)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stripped() {
        let content = HtmlBackend::new()
            .extract(
                b"<html><body><h1>Title</h1><p>Body text</p></body></html>",
                &BackendOptions::default(),
            )
            .unwrap();
        assert_eq!(
            content,
            ExtractedContent::Text("Title\nBody text".to_string())
        );
    }

    #[test]
    fn test_script_and_style_content_is_dropped() {
        let html = b"<html><head><style>p { color: red }</style></head>\
            <body><script>var x = 1;</script><p>Visible</p></body></html>";
        let content = HtmlBackend::new()
            .extract(html, &BackendOptions::default())
            .unwrap();
        assert_eq!(content, ExtractedContent::Text("Visible".to_string()));
    }

    #[test]
    fn test_plain_text_input_survives() {
        let content = HtmlBackend::new()
            .extract(b"just words", &BackendOptions::default())
            .unwrap();
        assert_eq!(content, ExtractedContent::Text("just words".to_string()));
    }
}
