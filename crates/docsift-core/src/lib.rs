//! docsift-core - Document model and layout association for docsift
//!
//! This crate holds the request-scoped data model shared by the rest of the
//! workspace and the layout associator, the geometric component that turns
//! independently-detected page elements into structured output:
//!
//! 1. **Checkbox association**: every detected selection mark is paired with
//!    the text line whose polygon centroid is nearest on the same page.
//! 2. **Table assembly**: flat cell records (row index, column index,
//!    content) are placed into a rectangular grid of strings.
//!
//! Everything here is pure, synchronous computation over already-fetched
//! detections. I/O, format decoding and the remote analysis service live in
//! the sibling crates (`docsift-backend`, `docsift-email`,
//! `docsift-analysis`).
//!
//! # Examples
//!
//! ```rust
//! use docsift_core::geometry::{Point, Polygon};
//! use docsift_core::layout::{associate, AssociatorOptions, SelectionMark, SelectionState, TextLine};
//!
//! let marks = vec![SelectionMark {
//!     page: 1,
//!     state: SelectionState::Selected,
//!     polygon: Polygon::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
//! }];
//! let lines = vec![TextLine {
//!     page: 1,
//!     text: "Approve".to_string(),
//!     polygon: Polygon::new(vec![Point::new(3.0, 1.0), Point::new(4.0, 2.0)]),
//! }];
//!
//! let outcome = associate(&marks, &lines, AssociatorOptions::default());
//! assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("Approve"));
//! ```

/// Uniform result model for ingested documents
pub mod document;
/// Error types for ingestion operations
pub mod error;
/// Input format detection
pub mod format;
/// Page-space geometry primitives
pub mod geometry;
/// Checkbox-to-label association
pub mod layout;
/// Table grid assembly
pub mod table;

pub use document::{
    AnalyzedDocument, EmailDocument, ExtractedContent, IngestResult, ParsedAttachment,
};
pub use error::{DocsiftError, Result};
pub use format::InputFormat;
pub use geometry::{Point, Polygon};
pub use layout::{
    associate, AssociationOutcome, AssociatorOptions, Checkbox, ElementKind, LayoutWarning,
    SelectionMark, SelectionState, TextLine,
};
pub use table::{assemble_table, Table, TableCell, TableOutcome, MAX_GRID_DIM};
