//! Wire model of the form-layout service payload.
//!
//! The service reports per-page detections (selection marks, text lines)
//! and per-table flat cell lists in a camelCase JSON shape with polygons as
//! flat coordinate arrays. This module deserializes that shape and converts
//! it into the core model, rejecting records the core types cannot
//! represent (negative indices) with a logged warning.

use docsift_core::geometry::Polygon;
use docsift_core::layout::{SelectionMark, SelectionState, TextLine};
use docsift_core::table::TableCell;
use serde::Deserialize;

/// Top-level analysis payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    /// Per-page detections
    #[serde(default)]
    pub pages: Vec<WirePage>,
    /// Detected tables
    #[serde(default)]
    pub tables: Vec<WireTable>,
}

/// One analyzed page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePage {
    /// One-based page number
    pub page_number: u32,
    /// Detected checkboxes/radio marks
    #[serde(default)]
    pub selection_marks: Vec<WireSelectionMark>,
    /// Detected text lines
    #[serde(default)]
    pub lines: Vec<WireLine>,
}

/// A detected selection mark on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSelectionMark {
    /// Fill state; unrecognized values map to `Unknown`
    #[serde(default)]
    pub state: SelectionState,
    /// Flat `[x0, y0, x1, y1, ...]` outline
    #[serde(default)]
    pub polygon: Vec<f64>,
}

/// A detected text line on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLine {
    /// Recognized text
    #[serde(default)]
    pub content: String,
    /// Flat `[x0, y0, x1, y1, ...]` outline
    #[serde(default)]
    pub polygon: Vec<f64>,
}

/// A detected table on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTable {
    /// Declared number of columns
    #[serde(default)]
    pub column_count: usize,
    /// Flat cell list
    #[serde(default)]
    pub cells: Vec<WireCell>,
}

/// One table cell on the wire.
///
/// Indices are signed here because the wire format does not forbid
/// negative values; conversion rejects them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCell {
    /// Row position, possibly out of range
    pub row_index: i64,
    /// Column position, possibly out of range
    pub column_index: i64,
    /// Cell text
    #[serde(default)]
    pub content: String,
    /// Page regions the cell spans
    #[serde(default)]
    pub bounding_regions: Vec<WireRegion>,
}

/// A page region reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRegion {
    /// One-based page number
    pub page_number: u32,
}

/// Converted analysis output in core terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutAnalysis {
    /// Detected selection marks across all pages
    pub marks: Vec<SelectionMark>,
    /// Detected text lines across all pages
    pub lines: Vec<TextLine>,
    /// Detected tables, cells pre-partitioned per table
    pub tables: Vec<DetectedTable>,
}

/// One detected table in core terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedTable {
    /// Declared column count
    pub column_count: usize,
    /// Cells of this table
    pub cells: Vec<TableCell>,
}

impl From<AnalyzeResult> for LayoutAnalysis {
    fn from(result: AnalyzeResult) -> Self {
        let mut marks = Vec::new();
        let mut lines = Vec::new();

        for page in result.pages {
            for mark in page.selection_marks {
                marks.push(SelectionMark {
                    page: page.page_number,
                    state: mark.state,
                    polygon: Polygon::from_flat(&mark.polygon),
                });
            }
            for line in page.lines {
                lines.push(TextLine {
                    page: page.page_number,
                    text: line.content,
                    polygon: Polygon::from_flat(&line.polygon),
                });
            }
        }

        let tables = result
            .tables
            .into_iter()
            .map(|table| DetectedTable {
                column_count: table.column_count,
                cells: table.cells.iter().filter_map(convert_cell).collect(),
            })
            .collect();

        Self {
            marks,
            lines,
            tables,
        }
    }
}

/// Convert one wire cell, rejecting negative indices.
fn convert_cell(cell: &WireCell) -> Option<TableCell> {
    let Ok(row_index) = usize::try_from(cell.row_index) else {
        log::warn!(
            "rejecting table cell with negative row index {}",
            cell.row_index
        );
        return None;
    };
    let Ok(column_index) = usize::try_from(cell.column_index) else {
        log::warn!(
            "rejecting table cell with negative column index {}",
            cell.column_index
        );
        return None;
    };

    let page = cell
        .bounding_regions
        .first()
        .map_or(1, |region| region.page_number);

    Some(TableCell::new(
        row_index,
        column_index,
        page,
        cell.content.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::geometry::Point;

    const PAYLOAD: &str = r#"{
        "pages": [
            {
                "pageNumber": 1,
                "selectionMarks": [
                    {"state": "selected", "polygon": [1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0, 2.0]}
                ],
                "lines": [
                    {"content": "Approve", "polygon": [3.0, 1.0, 5.0, 1.0, 5.0, 2.0, 3.0, 2.0]}
                ]
            }
        ],
        "tables": [
            {
                "columnCount": 2,
                "cells": [
                    {"rowIndex": 0, "columnIndex": 0, "content": "A",
                     "boundingRegions": [{"pageNumber": 1}]},
                    {"rowIndex": 0, "columnIndex": 1, "content": "B",
                     "boundingRegions": [{"pageNumber": 1}]}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_and_convert() {
        let result: AnalyzeResult = serde_json::from_str(PAYLOAD).unwrap();
        let analysis = LayoutAnalysis::from(result);

        assert_eq!(analysis.marks.len(), 1);
        assert_eq!(analysis.marks[0].page, 1);
        assert_eq!(analysis.marks[0].state, SelectionState::Selected);
        assert_eq!(
            analysis.marks[0].polygon.points[0],
            Point::new(1.0, 1.0)
        );

        assert_eq!(analysis.lines.len(), 1);
        assert_eq!(analysis.lines[0].text, "Approve");

        assert_eq!(analysis.tables.len(), 1);
        assert_eq!(analysis.tables[0].column_count, 2);
        assert_eq!(analysis.tables[0].cells.len(), 2);
        assert_eq!(analysis.tables[0].cells[1].content, "B");
    }

    #[test]
    fn test_negative_wire_index_rejects_cell() {
        let json = r#"{
            "tables": [{
                "columnCount": 1,
                "cells": [
                    {"rowIndex": -1, "columnIndex": 0, "content": "bad"},
                    {"rowIndex": 0, "columnIndex": 0, "content": "good"}
                ]
            }]
        }"#;

        let result: AnalyzeResult = serde_json::from_str(json).unwrap();
        let analysis = LayoutAnalysis::from(result);
        assert_eq!(analysis.tables[0].cells.len(), 1);
        assert_eq!(analysis.tables[0].cells[0].content, "good");
    }

    #[test]
    fn test_unknown_selection_state_degrades() {
        let json = r#"{
            "pages": [{
                "pageNumber": 2,
                "selectionMarks": [{"state": "signed", "polygon": [0.0, 0.0]}]
            }]
        }"#;

        let result: AnalyzeResult = serde_json::from_str(json).unwrap();
        let analysis = LayoutAnalysis::from(result);
        assert_eq!(analysis.marks[0].state, SelectionState::Unknown);
    }

    #[test]
    fn test_missing_bounding_region_defaults_to_page_one() {
        let json = r#"{
            "tables": [{
                "columnCount": 1,
                "cells": [{"rowIndex": 0, "columnIndex": 0, "content": "x"}]
            }]
        }"#;

        let result: AnalyzeResult = serde_json::from_str(json).unwrap();
        let analysis = LayoutAnalysis::from(result);
        assert_eq!(analysis.tables[0].cells[0].page, 1);
    }

    #[test]
    fn test_empty_payload() {
        let result: AnalyzeResult = serde_json::from_str("{}").unwrap();
        let analysis = LayoutAnalysis::from(result);
        assert!(analysis.marks.is_empty());
        assert!(analysis.lines.is_empty());
        assert!(analysis.tables.is_empty());
    }
}
