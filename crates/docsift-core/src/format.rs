//! Input format detection.
//!
//! Dispatch is by filename extension, matching the upload contract: the
//! container formats (EML, MSG) are walked recursively, everything else is
//! decoded by a single backend.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFormat {
    /// Email message file (RFC 5322)
    #[serde(rename = "EML")]
    Eml,
    /// Microsoft Outlook message (.msg)
    #[serde(rename = "MSG")]
    Msg,
    /// PDF document
    #[serde(rename = "PDF")]
    Pdf,
    /// Microsoft Word document (.docx)
    #[serde(rename = "DOCX")]
    Docx,
    /// Microsoft Word 97-2003 document (.doc)
    #[serde(rename = "DOC")]
    Doc,
    /// Plain text file
    #[serde(rename = "TXT")]
    Txt,
    /// CSV file
    #[serde(rename = "CSV")]
    Csv,
    /// Microsoft Excel (.xlsx)
    #[serde(rename = "XLSX")]
    Xlsx,
    /// HTML document
    #[serde(rename = "HTML")]
    Html,
    /// JPEG image
    #[serde(rename = "JPEG")]
    Jpeg,
    /// PNG image
    #[serde(rename = "PNG")]
    Png,
}

impl InputFormat {
    /// Detect format from a file extension (case-insensitive)
    #[must_use = "detects format from file extension"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "eml" => Some(Self::Eml),
            "msg" => Some(Self::Msg),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "txt" => Some(Self::Txt),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "html" | "htm" => Some(Self::Html),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Detect format from a file path's extension
    #[must_use = "detects format from file path"]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions associated with this format
    #[must_use = "returns file extensions for this format"]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Eml => &["eml"],
            Self::Msg => &["msg"],
            Self::Pdf => &["pdf"],
            Self::Docx => &["docx"],
            Self::Doc => &["doc"],
            Self::Txt => &["txt"],
            Self::Csv => &["csv"],
            Self::Xlsx => &["xlsx"],
            Self::Html => &["html", "htm"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }

    /// Whether this format is an email container whose attachments are
    /// walked recursively
    #[inline]
    #[must_use = "email check result is returned but not used"]
    pub const fn is_email(&self) -> bool {
        matches!(self, Self::Eml | Self::Msg)
    }

    /// Whether this format is a raster image
    #[inline]
    #[must_use = "image check result is returned but not used"]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }

    /// Whether documents of this format go through form-layout analysis
    /// (tables and checkboxes) in addition to text extraction
    #[inline]
    #[must_use = "layout-analysis check result is returned but not used"]
    pub const fn uses_layout_analysis(&self) -> bool {
        matches!(self, Self::Pdf | Self::Jpeg | Self::Png)
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Eml => "eml",
            Self::Msg => "msg",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Html => "html",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unknown input format: '{s}'"))
    }
}
