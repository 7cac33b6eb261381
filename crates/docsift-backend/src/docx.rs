//! Microsoft Word (.docx) backend.
//!
//! A DOCX file is a ZIP container; the document body lives in
//! `word/document.xml`. This backend streams that part with quick-xml and
//! collects the text runs (`w:t`), one output line per paragraph (`w:p`).

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

/// DOCX document backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new DOCX backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    /// Pull `word/document.xml` out of the ZIP container.
    fn read_document_xml(data: &[u8]) -> Result<String, DocsiftError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| DocsiftError::BackendError(format!("DOCX open error: {e}")))?;

        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| DocsiftError::BackendError(format!("DOCX has no document part: {e}")))?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| DocsiftError::BackendError(format!("DOCX read error: {e}")))?;
        Ok(xml)
    }

    /// Collect text runs from the document XML.
    fn text_from_xml(xml: &str) -> Result<String, DocsiftError> {
        let mut reader = Reader::from_str(xml);
        let mut output = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if e.name().as_ref() == b"w:t" {
                        in_text_run = true;
                    }
                }
                // Tabs and line breaks are self-closing elements.
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"w:tab" => output.push('\t'),
                    b"w:br" => output.push('\n'),
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => output.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(ref t)) if in_text_run => {
                    let text = t.unescape().map_err(|e| {
                        DocsiftError::BackendError(format!("DOCX text decode error: {e}"))
                    })?;
                    output.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(DocsiftError::BackendError(format!(
                        "DOCX XML parse error: {e}"
                    )));
                }
            }
        }

        Ok(output.trim_end().to_string())
    }
}

impl DocumentBackend for DocxBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        let xml = Self::read_document_xml(data)?;
        let text = Self::text_from_xml(&xml)?;
        Ok(ExtractedContent::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t xml:space="preserve"> half.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let content = DocxBackend::new()
            .extract(&docx_bytes(DOCUMENT_XML), &BackendOptions::default())
            .unwrap();
        assert_eq!(
            content,
            ExtractedContent::Text("First paragraph.\nSecond half.".to_string())
        );
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:pPr>style noise</w:pPr><w:r><w:t>kept</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = DocxBackend::text_from_xml(xml).unwrap();
        assert_eq!(text, "kept");
    }

    #[test]
    fn test_non_zip_payload_is_rejected() {
        let result = DocxBackend::new().extract(b"plain bytes", &BackendOptions::default());
        assert!(matches!(result, Err(DocsiftError::BackendError(_))));
    }

    #[test]
    fn test_zip_without_document_part_is_rejected() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("other.txt", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"x").unwrap();
            writer.finish().unwrap();
        }
        let result =
            DocxBackend::new().extract(&cursor.into_inner(), &BackendOptions::default());
        assert!(matches!(result, Err(DocsiftError::BackendError(_))));
    }
}
