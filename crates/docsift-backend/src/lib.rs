//! docsift-backend - Per-format decoders and the document converter
//!
//! Each supported format has a small backend implementing
//! [`DocumentBackend`]; [`DocumentConverter`] detects the input format from
//! the filename, dispatches to the right backend, and walks email
//! containers attachment by attachment.
//!
//! PDF and image backends take a [`docsift_analysis::LayoutAnalyzer`]
//! handle; with one attached their results include the tables and
//! checkboxes recovered by the layout associator.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docsift_backend::DocumentConverter;
//!
//! let converter = DocumentConverter::new();
//! let result = converter.convert_path("message.eml")?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Document converter and format dispatch
pub mod converter;
/// Shared trait definitions and options
pub mod traits;

/// Legacy Word (.doc) backend
pub mod doc;
/// Word (.docx) backend
pub mod docx;
/// CSV backend
pub mod csv;
/// HTML backend
pub mod html;
/// Image (JPEG/PNG) backend
pub mod image;
/// PDF backend
pub mod pdf;
/// Plain text backend
pub mod txt;
/// Excel (.xlsx) backend
pub mod xlsx;

mod tabular;

pub use converter::DocumentConverter;
pub use traits::{BackendOptions, DocumentBackend};
